// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured project description for the persistence/network boundary
//!
//! Buildings own floors, floors own walls, walls own point-pair geometry and
//! optional child openings. Serialization and transport belong entirely to
//! the remote collaborators; these types only derive serde and carry no
//! transport logic.

use crate::types::{PlanConfig, Segment};
use serde::{Deserialize, Serialize};

/// Openings wider than this (world units) count as doors
const DOOR_MIN_WIDTH: f64 = 0.9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_id: String,
    pub last_updated: String,
    pub buildings: Vec<Building>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub position: WorldPoint,
    pub floors: Vec<FloorLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorLevel {
    pub id: String,
    pub name: String,
    pub height: f64,
    pub walls: Vec<WallItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallItem {
    pub id: String,
    pub name: String,
    pub properties: WallProperties,
    pub children: Vec<OpeningItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallProperties {
    pub start_point: WorldPoint,
    pub end_point: WorldPoint,
    pub thickness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OpeningKind,
    pub properties: OpeningProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Classify an opening by width; door/window recognition from pixels is
    /// out of scope, so this only maps structured data.
    pub fn from_width(width: f64) -> Self {
        if width > DOOR_MIN_WIDTH {
            OpeningKind::Door
        } else {
            OpeningKind::Window
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningProperties {
    pub offset: WorldPoint,
    pub width: f64,
    pub height: f64,
}

impl ProjectData {
    /// Build a single-building, single-floor project description from the
    /// detected wall segments. `project_id` and `last_updated` come from the
    /// caller: the core is a deterministic offline transform and does not
    /// read clocks or generate identifiers.
    pub fn from_segments(
        segments: &[Segment],
        grid_width: u32,
        grid_height: u32,
        config: &PlanConfig,
        project_id: String,
        last_updated: String,
    ) -> Self {
        let thickness = config.wall_thickness(grid_width, grid_height);

        let walls = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let (sx, sz) = config.world_xz(seg.start.x, seg.start.y, grid_width, grid_height);
                let (ex, ez) = config.world_xz(seg.end.x, seg.end.y, grid_width, grid_height);
                WallItem {
                    id: format!("w_{}", i + 1),
                    name: format!("wall_{}", i + 1),
                    properties: WallProperties {
                        start_point: WorldPoint::new(sx, 0.0, sz),
                        end_point: WorldPoint::new(ex, 0.0, ez),
                        thickness,
                    },
                    children: Vec::new(),
                }
            })
            .collect();

        Self {
            project_id,
            last_updated,
            buildings: vec![Building {
                id: "b_1".to_string(),
                name: "building_1".to_string(),
                position: WorldPoint::new(0.0, 0.0, 0.0),
                floors: vec![FloorLevel {
                    id: "f_1".to_string(),
                    name: "floor_1".to_string(),
                    height: config.wall_height,
                    walls,
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2D;

    fn sample_project() -> ProjectData {
        let config = PlanConfig::default();
        let segments = vec![Segment::new(Point2D::new(0.0, 5.0), Point2D::new(10.0, 5.0))];
        ProjectData::from_segments(
            &segments,
            10,
            10,
            &config,
            "p_1".to_string(),
            "2024-01-01 00:00:00".to_string(),
        )
    }

    #[test]
    fn test_walls_carry_point_pairs() {
        let project = sample_project();

        let wall = &project.buildings[0].floors[0].walls[0];
        assert_eq!(wall.id, "w_1");
        assert_eq!(wall.properties.start_point, WorldPoint::new(-5.0, 0.0, 0.0));
        assert_eq!(wall.properties.end_point, WorldPoint::new(5.0, 0.0, 0.0));
        assert!(wall.children.is_empty());
    }

    #[test]
    fn test_wire_format_field_names() {
        let project = sample_project();
        let json = serde_json::to_value(&project).unwrap();

        assert!(json.get("projectId").is_some());
        assert!(json.get("lastUpdated").is_some());
        let wall = &json["buildings"][0]["floors"][0]["walls"][0];
        assert!(wall["properties"].get("startPoint").is_some());
        assert!(wall["properties"].get("endPoint").is_some());
    }

    #[test]
    fn test_opening_kind_roundtrip() {
        let opening = OpeningItem {
            id: "door_001".to_string(),
            name: "door_1".to_string(),
            kind: OpeningKind::from_width(1.2),
            properties: OpeningProperties {
                offset: WorldPoint::new(1.0, 0.0, 0.0),
                width: 1.2,
                height: 2.1,
            },
        };
        assert_eq!(opening.kind, OpeningKind::Door);

        let json = serde_json::to_string(&opening).unwrap();
        assert!(json.contains("\"type\":\"door\""));

        let back: OpeningItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, OpeningKind::Door);
    }

    #[test]
    fn test_narrow_opening_is_window() {
        assert_eq!(OpeningKind::from_width(0.6), OpeningKind::Window);
    }
}
