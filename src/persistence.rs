//! Loading room content and rotation config from RON files.
//!
//! A room file holds one [`SceneNode`] tree; a config file holds a
//! [`RotationConfig`] with any subset of its fields.

use std::fs;
use std::path::Path;

use crate::config::RotationConfig;
use crate::error::ConfigError;
use crate::room::SceneNode;

const DEMO_ROOM: &str = include_str!("../rooms/demo.ron");

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a room content tree.
pub fn parse_room(source: &str) -> Result<SceneNode, ConfigError> {
    Ok(ron::from_str(source)?)
}

pub fn load_room(path: &Path) -> Result<SceneNode, ConfigError> {
    let root = parse_room(&read(path)?)?;
    log::info!("loaded room `{}` from {}", root.name, path.display());
    Ok(root)
}

/// Parses and validates a rotation config.
pub fn parse_config(source: &str) -> Result<RotationConfig, ConfigError> {
    let config: RotationConfig = ron::from_str(source)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<RotationConfig, ConfigError> {
    let config = parse_config(&read(path)?)?;
    log::info!("loaded rotation config from {}", path.display());
    Ok(config)
}

/// The room bundled with the binary.
pub fn demo_room() -> Result<SceneNode, ConfigError> {
    parse_room(DEMO_ROOM)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::orientation::Face;
    use crate::room::Room;

    #[test]
    fn test_demo_room_is_clean() {
        let room = Room::initialize(&demo_room().unwrap());
        assert!(room.defects().is_empty(), "{:?}", room.defects());
        for face in Face::ALL {
            assert!(room.interior_wall(face).is_some(), "missing {face}");
        }
        assert!(room.default_spawn().is_some());
    }

    #[test]
    fn test_parse_room_defaults() {
        let root = parse_room(
            r#"(
                name: "Tiny",
                children: [
                    (name: "Geometry", children: [
                        (name: "Interior", children: [
                            (name: "Floor", component: Some(Wall((face: Bottom)))),
                        ]),
                    ]),
                ],
            )"#,
        )
        .unwrap();
        let room = Room::initialize(&root);
        let floor = room.interior_wall(Face::Bottom).unwrap();
        assert!(!floor.is_walkable());
        assert!(floor.is_enabled_by_default());
        assert_eq!(room.name(), "Tiny");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            parse_config("(snap_increment: 30.0)"),
            Err(ConfigError::Invalid {
                field: "snap_increment",
                ..
            })
        ));
        assert!(matches!(parse_config("(step_duration: "), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_room(Path::new("no/such/room.ron")).unwrap_err();
        assert!(err.to_string().contains("room.ron"));
    }
}
