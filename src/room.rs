//! Room content and the one-time geometry cache built from it.
//!
//! Room content is authored as a tree of named [`SceneNode`]s. The room root
//! is expected to have three children:
//!
//! - `Geometry`, holding an `Interior` and an `Exterior` group of walls
//! - `Anchors`, holding named spawn points
//! - `Puzzles`, holding puzzles that do not belong to a wall
//!
//! [`Room::initialize`] scans the tree once. After that the set of walls never
//! changes; only their content activation flags do.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ContentDefect;
use crate::orientation::Face;

/// Name of the anchor used when no anchor name is given.
pub const DEFAULT_ANCHOR: &str = "Spawn";

fn default_true() -> bool {
    true
}

fn default_anchor_name() -> String {
    DEFAULT_ANCHOR.to_owned()
}

/// A named node in the room content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub component: Option<Component>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// This node and everything beneath it, depth first, parents before
    /// children.
    pub fn descendants(&self) -> Vec<&SceneNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Gameplay data attached to a [`SceneNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Wall(WallSpec),
    Item(ItemPickup),
    Portal(Portal),
    Puzzle(PuzzleRef),
    Anchor(Anchor),
}

/// Authoring data for a wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub face: Face,
    /// Whether the wall's content is shown even when it is not the floor.
    #[serde(default)]
    pub walkable: bool,
    /// Set to `false` to show the content only while this wall is the floor.
    #[serde(default = "default_true")]
    pub enabled_by_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPickup {
    pub item_id: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub target_room: usize,
    #[serde(default = "default_anchor_name")]
    pub spawn_name: String,
    #[serde(default)]
    pub require_interaction: bool,
    #[serde(default)]
    pub required_item: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRef {
    pub id: String,
    #[serde(default)]
    pub required_item: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub position: [f32; 3],
}

/// A cached wall with the items and portals found beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    name: String,
    face: Face,
    interior: bool,
    walkable: bool,
    enabled_by_default: bool,
    content_active: bool,
    items: Vec<ItemPickup>,
    portals: Vec<Portal>,
}

impl Wall {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn face(&self) -> Face {
        self.face
    }
    pub fn is_interior(&self) -> bool {
        self.interior
    }
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }
    pub fn is_enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }
    /// Whether the wall's items and portals are currently shown.
    pub fn is_content_active(&self) -> bool {
        self.content_active
    }
    pub fn items(&self) -> &[ItemPickup] {
        &self.items
    }
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub(crate) fn set_content_active(&mut self, active: bool) {
        self.content_active = active;
        for item in &mut self.items {
            item.active = active;
        }
        for portal in &mut self.portals {
            portal.active = active;
        }
    }
}

/// Location of a wall's item or portal in [`Room::walls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContentRef {
    wall: usize,
    index: usize,
}

/// A room with its walls indexed by face.
#[derive(Debug, Clone, Default)]
pub struct Room {
    name: String,
    walls: Vec<Wall>,
    interior: FxHashMap<Face, usize>,
    exterior: FxHashMap<Face, usize>,
    items: Vec<ContentRef>,
    portals: Vec<ContentRef>,
    puzzles: Vec<PuzzleRef>,
    anchors: Vec<(String, Anchor)>,
    defects: Vec<ContentDefect>,
}

impl Room {
    /// Scans a room content tree once and caches everything the rotation
    /// core needs.
    ///
    /// Never fails: missing subtrees leave the matching collections empty and
    /// duplicate faces keep the later wall. Both are recorded in
    /// [`Room::defects`] and logged.
    pub fn initialize(root: &SceneNode) -> Room {
        let mut room = Room {
            name: root.name.clone(),
            ..Room::default()
        };

        match root.child("Geometry") {
            Some(geometry) => {
                for (group_name, interior) in [("Interior", true), ("Exterior", false)] {
                    match geometry.child(group_name) {
                        Some(group) => room.cache_wall_group(group, interior),
                        None => room
                            .defects
                            .push(ContentDefect::MissingSubtree { name: group_name }),
                    }
                }
            }
            None => room
                .defects
                .push(ContentDefect::MissingSubtree { name: "Geometry" }),
        }
        room.flatten_wall_content();

        match root.child("Anchors") {
            Some(anchors) => room.cache_anchors(anchors),
            None => room
                .defects
                .push(ContentDefect::MissingSubtree { name: "Anchors" }),
        }

        // the puzzle root is optional
        if let Some(puzzles) = root.child("Puzzles") {
            room.cache_puzzles(puzzles);
        }

        for defect in &room.defects {
            log::warn!("room `{}`: {defect}", room.name);
        }
        log::debug!(
            "room `{}` cached: {} walls, {} items, {} portals, {} puzzles",
            room.name,
            room.walls.len(),
            room.items.len(),
            room.portals.len(),
            room.puzzles.len()
        );

        room
    }

    fn cache_wall_group(&mut self, group: &SceneNode, interior: bool) {
        for node in group.descendants() {
            let Some(Component::Wall(spec)) = &node.component else {
                continue;
            };

            let mut items = Vec::new();
            let mut portals = Vec::new();
            for content in node.descendants() {
                match &content.component {
                    Some(Component::Item(item)) => items.push(item.clone()),
                    Some(Component::Portal(portal)) => portals.push(portal.clone()),
                    _ => {}
                }
            }

            let index = self.walls.len();
            self.walls.push(Wall {
                name: node.name.clone(),
                face: spec.face,
                interior,
                walkable: spec.walkable,
                enabled_by_default: spec.enabled_by_default,
                content_active: true,
                items,
                portals,
            });

            let by_face = if interior {
                &mut self.interior
            } else {
                &mut self.exterior
            };
            if by_face.insert(spec.face, index).is_some() {
                self.defects.push(ContentDefect::DuplicateFace {
                    face: spec.face,
                    interior,
                });
            }
        }
    }

    fn flatten_wall_content(&mut self) {
        for (wall_index, wall) in self.walls.iter().enumerate() {
            self.items.extend((0..wall.items.len()).map(|index| ContentRef {
                wall: wall_index,
                index,
            }));
            self.portals.extend((0..wall.portals.len()).map(|index| ContentRef {
                wall: wall_index,
                index,
            }));
        }
    }

    fn cache_anchors(&mut self, anchors: &SceneNode) {
        for node in anchors.descendants() {
            if let Some(Component::Anchor(anchor)) = &node.component {
                self.anchors.push((node.name.clone(), *anchor));
            }
        }
    }

    fn cache_puzzles(&mut self, puzzles: &SceneNode) {
        for node in puzzles.descendants() {
            let Some(Component::Puzzle(puzzle)) = &node.component else {
                continue;
            };
            if self.puzzles.iter().any(|known| known.id == puzzle.id) {
                self.defects.push(ContentDefect::DuplicatePuzzle {
                    id: puzzle.id.clone(),
                });
            } else {
                self.puzzles.push(puzzle.clone());
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All walls, interior and exterior, in content order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub(crate) fn walls_mut(&mut self) -> &mut [Wall] {
        &mut self.walls
    }

    /// Index into [`Room::walls`] of the interior wall on `face`.
    pub fn interior_wall_index(&self, face: Face) -> Option<usize> {
        self.interior.get(&face).copied()
    }

    pub fn interior_wall(&self, face: Face) -> Option<&Wall> {
        self.interior_wall_index(face).map(|index| &self.walls[index])
    }

    pub fn exterior_wall(&self, face: Face) -> Option<&Wall> {
        self.exterior.get(&face).map(|&index| &self.walls[index])
    }

    /// Every item attached to a wall.
    pub fn items(&self) -> impl Iterator<Item = &ItemPickup> + '_ {
        self.items
            .iter()
            .map(|content| &self.walls[content.wall].items[content.index])
    }

    /// Every portal attached to a wall.
    pub fn portals(&self) -> impl Iterator<Item = &Portal> + '_ {
        self.portals
            .iter()
            .map(|content| &self.walls[content.wall].portals[content.index])
    }

    pub fn puzzles(&self) -> &[PuzzleRef] {
        &self.puzzles
    }

    /// Looks up an anchor by name; a blank name means [`DEFAULT_ANCHOR`].
    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        let name = if name.trim().is_empty() {
            DEFAULT_ANCHOR
        } else {
            name
        };
        self.anchors
            .iter()
            .find(|(anchor_name, _)| anchor_name == name)
            .map(|(_, anchor)| anchor)
    }

    pub fn default_spawn(&self) -> Option<&Anchor> {
        self.anchor(DEFAULT_ANCHOR)
    }

    /// Authoring problems found by [`Room::initialize`].
    pub fn defects(&self) -> &[ContentDefect] {
        &self.defects
    }

    /// Faces of the interior walls whose content is shown, in [`Face::ALL`]
    /// order.
    pub fn active_interior_faces(&self) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|&face| self.interior_wall(face).is_some_and(Wall::is_content_active))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn wall(face: Face, walkable: bool) -> SceneNode {
        SceneNode::new(format!("{face}Wall")).with_component(Component::Wall(WallSpec {
            face,
            walkable,
            enabled_by_default: true,
        }))
    }

    fn item(id: &str) -> SceneNode {
        SceneNode::new(id).with_component(Component::Item(ItemPickup {
            item_id: id.to_owned(),
            active: true,
        }))
    }

    /// Six interior walls (only the bottom walkable), two exterior walls,
    /// a key on the back wall, a portal on the left wall and one puzzle.
    pub(crate) fn cube_room() -> SceneNode {
        let interior = Face::ALL.map(|face| {
            let node = wall(face, face == Face::Bottom);
            match face {
                Face::Back => node.with_children([item("Key_01")]),
                Face::Left => node.with_children([SceneNode::new("Door")
                    .with_component(Component::Portal(Portal {
                        target_room: 1,
                        spawn_name: DEFAULT_ANCHOR.to_owned(),
                        require_interaction: true,
                        required_item: Some("Key_01".to_owned()),
                        active: true,
                    }))]),
                _ => node,
            }
        });

        SceneNode::new("Room").with_children([
            SceneNode::new("Geometry").with_children([
                SceneNode::new("Interior").with_children(interior),
                SceneNode::new("Exterior")
                    .with_children([wall(Face::Top, false), wall(Face::Front, false)]),
            ]),
            SceneNode::new("Anchors").with_children([SceneNode::new("Spawn")
                .with_component(Component::Anchor(Anchor {
                    position: [0.0, -1.0, 0.0],
                }))]),
            SceneNode::new("Puzzles").with_children([SceneNode::new("Plate")
                .with_component(Component::Puzzle(PuzzleRef {
                    id: "Puzzle_01".to_owned(),
                    required_item: None,
                }))]),
        ])
    }

    #[test]
    fn test_initialize_indexes_walls_by_face() {
        let room = Room::initialize(&cube_room());
        assert!(room.defects().is_empty());
        assert_eq!(room.walls().len(), 8);
        for face in Face::ALL {
            let wall = room.interior_wall(face).unwrap();
            assert_eq!(wall.face(), face);
            assert!(wall.is_interior());
        }
        assert!(room.exterior_wall(Face::Top).is_some());
        assert!(room.exterior_wall(Face::Bottom).is_none());
        assert!(!room.exterior_wall(Face::Front).unwrap().is_interior());
    }

    #[test]
    fn test_initialize_flattens_wall_content() {
        let room = Room::initialize(&cube_room());
        let items: Vec<_> = room.items().map(|item| item.item_id.as_str()).collect();
        assert_eq!(items, vec!["Key_01"]);
        assert_eq!(room.portals().count(), 1);
        assert_eq!(room.interior_wall(Face::Back).unwrap().items().len(), 1);
        assert_eq!(room.puzzles().len(), 1);
    }

    #[test]
    fn test_anchor_lookup() {
        let room = Room::initialize(&cube_room());
        assert_eq!(room.anchor("").map(|a| a.position), Some([0.0, -1.0, 0.0]));
        assert_eq!(room.default_spawn(), room.anchor("Spawn"));
        assert!(room.anchor("Nowhere").is_none());
    }

    #[test]
    fn test_missing_subtrees_degrade_to_empty() {
        let room = Room::initialize(&SceneNode::new("Empty"));
        assert!(room.walls().is_empty());
        assert_eq!(room.items().count(), 0);
        assert!(room.puzzles().is_empty());
        assert_eq!(
            room.defects(),
            &[
                ContentDefect::MissingSubtree { name: "Geometry" },
                ContentDefect::MissingSubtree { name: "Anchors" },
            ]
        );
    }

    #[test]
    fn test_duplicate_face_is_flagged_and_last_wins() {
        let root = SceneNode::new("Room").with_children([
            SceneNode::new("Geometry").with_children([
                SceneNode::new("Interior").with_children([
                    wall(Face::Left, false),
                    wall(Face::Left, true),
                ]),
                SceneNode::new("Exterior"),
            ]),
            SceneNode::new("Anchors"),
        ]);
        let room = Room::initialize(&root);
        assert_eq!(
            room.defects(),
            &[ContentDefect::DuplicateFace {
                face: Face::Left,
                interior: true
            }]
        );
        assert_eq!(room.interior_wall_index(Face::Left), Some(1));
        assert!(room.interior_wall(Face::Left).unwrap().is_walkable());
    }

    #[test]
    fn test_duplicate_puzzle_is_kept_once() {
        let mut root = cube_room();
        let puzzles = root
            .children
            .iter_mut()
            .find(|child| child.name == "Puzzles")
            .unwrap();
        let duplicate = SceneNode::new("Plate_Copy").with_component(Component::Puzzle(PuzzleRef {
            id: "Puzzle_01".to_owned(),
            required_item: Some("Key_01".to_owned()),
        }));
        puzzles.children.push(duplicate);

        let room = Room::initialize(&root);
        assert_eq!(room.puzzles().len(), 1);
        assert_eq!(room.puzzles()[0].required_item, None);
        assert_eq!(
            room.defects(),
            &[ContentDefect::DuplicatePuzzle {
                id: "Puzzle_01".to_owned()
            }]
        );
    }
}
