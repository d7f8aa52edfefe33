//! Family Tree - WASM Module
//!
//! This module lays out genealogy diagrams for the family tree page. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `family`: Profiles and the ancestor/descendant trees served by the API
//! - `layout`: Ancestor and descendant layout (card positions, connectors)
//! - `spatial`: R-tree over laid-out cards for hit testing
//! - `view`: The diagram on screen (engine + current layout + index)

use js_sys::{Array, Float64Array};
use log::{Level, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

pub mod family;
pub mod layout;
pub mod spatial;
pub mod view;

use family::{AncestorNode, DescendantNode, Profile};
use layout::FamilyLayoutConfig;
use view::TreeView;

/// Initialize the WASM module: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Info);
    info!("family-tree: module initialized");
}

/// Crate version, for diagnostics.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Number of people in an ancestor tree, subject included (0 for null).
#[wasm_bindgen(js_name = countAncestors)]
pub fn count_ancestors(root: JsValue) -> Result<u32, JsValue> {
    let root: Option<AncestorNode> = decode(root, "ancestor tree")?;
    Ok(family::count_ancestors(root.as_ref()) as u32)
}

/// Number of people in a descendant tree, subject included.
#[wasm_bindgen(js_name = countDescendants)]
pub fn count_descendants(root: JsValue) -> Result<u32, JsValue> {
    let root: DescendantNode = decode(root, "descendant tree")?;
    Ok(family::count_descendants(&root) as u32)
}

/// Ancestor badge count: everyone above the subject (0 for null).
#[wasm_bindgen(js_name = ancestorBadge)]
pub fn ancestor_badge(root: JsValue) -> Result<u32, JsValue> {
    let root: Option<AncestorNode> = decode(root, "ancestor tree")?;
    Ok(family::ancestor_badge(root.as_ref()) as u32)
}

/// Descendant badge count: everyone below the subject (0 for null).
#[wasm_bindgen(js_name = descendantBadge)]
pub fn descendant_badge(root: JsValue) -> Result<u32, JsValue> {
    let root: Option<DescendantNode> = decode(root, "descendant tree")?;
    Ok(family::descendant_badge(root.as_ref()) as u32)
}

/// Main entry point for the tree canvas.
///
/// This struct wraps the internal TreeView and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct FamilyTreeWasm {
    view: TreeView,
}

#[wasm_bindgen]
impl FamilyTreeWasm {
    /// Create a tree canvas with the default card geometry.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            view: TreeView::new(),
        }
    }

    /// Create a tree canvas from a partial configuration object.
    ///
    /// Omitted fields keep their defaults (`nodeWidth` 168, `nodeHeight` 70,
    /// `horizontalGap` 24, `verticalGap` 60, `padding` 40).
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<FamilyTreeWasm, JsValue> {
        let config: Option<FamilyLayoutConfig> = decode(config, "layout config")?;
        Ok(Self {
            view: TreeView::with_config(config.unwrap_or_default()),
        })
    }

    /// Limit the generations drawn (1-8); `undefined` draws everything.
    #[wasm_bindgen(js_name = setMaxGenerations)]
    pub fn set_max_generations(&mut self, generations: Option<u32>) {
        self.view.set_max_generations(generations);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out an ancestor diagram.
    ///
    /// Returns `{ nodes, edges, w, h, nodeWidth, nodeHeight }`. `siblings`
    /// and `spouses` may be null.
    #[wasm_bindgen(js_name = layoutAncestors)]
    pub fn layout_ancestors(
        &mut self,
        root: JsValue,
        siblings: JsValue,
        spouses: JsValue,
    ) -> Result<JsValue, JsValue> {
        let root: AncestorNode = decode(root, "ancestor tree")?;
        let siblings = decode_profiles(siblings, "siblings")?;
        let spouses = decode_profiles(spouses, "spouses")?;

        encode(self.view.show_ancestors(&root, &siblings, &spouses))
    }

    /// Lay out a descendant diagram. Siblings are never part of it.
    #[wasm_bindgen(js_name = layoutDescendants)]
    pub fn layout_descendants(
        &mut self,
        root: JsValue,
        spouses: JsValue,
    ) -> Result<JsValue, JsValue> {
        let root: DescendantNode = decode(root, "descendant tree")?;
        let spouses = decode_profiles(spouses, "spouses")?;

        encode(self.view.show_descendants(&root, &spouses))
    }

    /// Forget the current diagram.
    pub fn clear(&mut self) {
        self.view.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Profile id of the card under a canvas point.
    #[wasm_bindgen(js_name = profileAt)]
    pub fn profile_at(&self, x: f64, y: f64) -> Option<u32> {
        self.view.profile_at(x, y).map(|id| id.raw())
    }

    /// Profile id of the card closest to a canvas point.
    #[wasm_bindgen(js_name = nearestProfile)]
    pub fn nearest_profile(&self, x: f64, y: f64) -> Option<u32> {
        self.view.nearest_profile(x, y).map(|id| id.raw())
    }

    /// Profile ids of the cards intersecting a viewport rectangle.
    #[wasm_bindgen(js_name = profilesInRect)]
    pub fn profiles_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        self.view
            .profiles_in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(|id| id.raw())
            .collect()
    }

    /// SVG path data for each edge of the current diagram.
    #[wasm_bindgen(js_name = edgePaths)]
    pub fn edge_paths(&self) -> Array {
        self.view
            .edge_paths()
            .iter()
            .map(|d| JsValue::from_str(d))
            .collect()
    }

    /// Card text as `[{ id, name, lifespan }, ...]`, in node order.
    #[wasm_bindgen(js_name = cardLabels)]
    pub fn card_labels(&self) -> Result<JsValue, JsValue> {
        encode(&self.view.card_labels())
    }

    /// Card positions as `[x0, y0, x1, y1, ...]`.
    #[wasm_bindgen(js_name = nodePositions)]
    pub fn node_positions(&self) -> Float64Array {
        Float64Array::from(&self.view.positions()[..])
    }

    /// Canvas width of the current diagram (0 when none).
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.view.canvas_size().0
    }

    /// Canvas height of the current diagram (0 when none).
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.view.canvas_size().1
    }
}

impl Default for FamilyTreeWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        warn!("family-tree: failed to decode {what}: {e}");
        e.into()
    })
}

/// A missing list (null/undefined) is an empty one.
fn decode_profiles(value: JsValue, what: &str) -> Result<Vec<Profile>, JsValue> {
    let profiles: Option<Vec<Profile>> = decode(value, what)?;
    Ok(profiles.unwrap_or_default())
}

/// Plain JS object with `null` for absent dates, like the API payloads.
fn encode<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use family::ProfileId;
    use view::CardLabel;
    use layout::NodeType;

    /// Ancestor payload as returned by `/profiles/1/ancestors?depth=4`.
    const ANCESTORS_JSON: &str = r#"{
        "profile": {"id": 1, "userId": 1, "firstName": "Jean", "lastName": "Dupont", "gender": "MALE",
                    "dateOfBirth": "1985-03-15T00:00:00Z", "dateOfDeath": null, "age": 41, "residence": "Paris"},
        "father": {
            "profile": {"id": 2, "firstName": "Pierre", "lastName": "Dupont", "gender": "MALE",
                        "dateOfBirth": "1955-01-10T00:00:00Z", "dateOfDeath": null},
            "father": {
                "profile": {"id": 5, "firstName": "Louis", "lastName": "Dupont", "gender": "MALE",
                            "dateOfBirth": "1925-02-01T00:00:00Z", "dateOfDeath": "1999-08-30T00:00:00Z"},
                "father": null,
                "mother": null
            },
            "mother": null
        },
        "mother": {
            "profile": {"id": 3, "firstName": "Marie", "lastName": "Dupont", "gender": "FEMALE",
                        "dateOfBirth": "1958-06-20T00:00:00Z", "dateOfDeath": null},
            "father": null,
            "mother": null
        }
    }"#;

    const SIBLINGS_JSON: &str = r#"[
        {"id": 10, "firstName": "Luc", "lastName": "Dupont", "gender": "MALE", "dateOfBirth": "1988-09-01T00:00:00Z", "dateOfDeath": null}
    ]"#;

    const SPOUSES_JSON: &str = r#"[
        {"id": 4, "firstName": "Sophie", "lastName": "Dupont", "gender": "FEMALE", "dateOfBirth": "1987-04-04T00:00:00Z", "dateOfDeath": null}
    ]"#;

    const DESCENDANTS_JSON: &str = r#"{
        "profile": {"id": 1, "firstName": "Jean", "lastName": "Dupont", "gender": "MALE", "dateOfBirth": "1985-03-15T00:00:00Z"},
        "children": [
            {"profile": {"id": 6, "firstName": "Emma", "lastName": "Dupont", "gender": "FEMALE", "dateOfBirth": "2012-05-05T00:00:00Z"}, "children": []},
            {"profile": {"id": 7, "firstName": "Hugo", "lastName": "Dupont", "gender": "MALE", "dateOfBirth": "2015-07-07T00:00:00Z"}, "children": []}
        ]
    }"#;

    /// Full pipeline: service payloads → layout → click on a card.
    #[test]
    fn test_ancestor_payload_to_click() {
        let root: AncestorNode = serde_json::from_str(ANCESTORS_JSON).unwrap();
        let siblings: Vec<Profile> = serde_json::from_str(SIBLINGS_JSON).unwrap();
        let spouses: Vec<Profile> = serde_json::from_str(SPOUSES_JSON).unwrap();

        assert_eq!(family::ancestor_badge(Some(&root)), 3);

        let mut view = TreeView::new();
        let layout = view.show_ancestors(&root, &siblings, &spouses).clone();

        assert_eq!(layout.nodes.len(), 4 + 1 + 1);
        assert_eq!(layout.edges.iter().filter(|e| e.dashed).count(), 2);
        assert_eq!(layout.edges.iter().filter(|e| !e.dashed).count(), 3);

        // Sibling in column 0, grandfather and father in 1, mother in 2
        let subject = layout.find_node(ProfileId(1)).unwrap();
        assert_eq!(subject.x, 1.5 * 192.0 + 40.0);
        assert_eq!(subject.y, 2.0 * 130.0 + 40.0);

        let grandfather = layout.find_node(ProfileId(5)).unwrap();
        assert_eq!(grandfather.depth, 2);
        let label = view.card_labels().into_iter().find(|l| l.id == ProfileId(5));
        assert_eq!(
            label,
            Some(CardLabel {
                id: ProfileId(5),
                name: "Louis Dupont".to_string(),
                lifespan: "1925 – 1999".to_string(),
            })
        );

        // Click in the middle of each card lands on its owner
        for node in &layout.nodes {
            let hit = view.profile_at(node.x + 84.0, node.y + 35.0);
            assert_eq!(hit, Some(node.profile.id), "click on {}", node.profile.display_name());
        }
        // A click just below the subject's card still selects the subject
        let below = (subject.x + 84.0, subject.y + 75.0);
        assert_eq!(view.profile_at(below.0, below.1), None);
        assert_eq!(view.nearest_profile(below.0, below.1), Some(ProfileId(1)));
    }

    #[test]
    fn test_descendant_payload_to_layout() {
        let root: DescendantNode = serde_json::from_str(DESCENDANTS_JSON).unwrap();
        let spouses: Vec<Profile> = serde_json::from_str(SPOUSES_JSON).unwrap();
        assert_eq!(family::descendant_badge(Some(&root)), 2);

        let mut view = TreeView::new();
        let layout = view.show_descendants(&root, &spouses);

        assert_eq!(layout.nodes.len(), 3 + 1);
        assert_eq!(layout.nodes_of_type(NodeType::Root).count(), 1);
        assert_eq!(layout.nodes_of_type(NodeType::Spouse).count(), 1);
        assert_eq!(layout.width, 3.0 * 192.0 - 24.0 + 80.0);

        let paths = view.edge_paths();
        assert_eq!(
            paths,
            vec![
                "M 220,110 C 220,140 124,140 124,170".to_string(),
                "M 220,110 C 220,140 316,140 316,170".to_string(),
            ]
        );
    }

    #[test]
    fn test_layout_serializes_for_renderer() {
        let root: AncestorNode = serde_json::from_str(ANCESTORS_JSON).unwrap();
        let layout = layout::FamilyTreeLayout::with_defaults().layout_ancestors(&root, &[], &[]);
        let value = serde_json::to_value(&layout).unwrap();

        assert!(value["w"].is_number());
        assert!(value["h"].is_number());
        let first = &value["nodes"][0];
        assert_eq!(first["profile"]["firstName"], "Louis");
        assert_eq!(first["nodeType"], "default");
        assert!(value["edges"][0]["dashed"].is_boolean());
        assert!(value["edges"][0]["animDelay"].is_number());
    }

    #[test]
    fn test_many_generations_stay_finite() {
        // Full pedigree of 8 generations: 511 people
        fn full(id: u32, generations: u32) -> AncestorNode {
            let node = AncestorNode::new(Profile::new(id, "P", ""));
            if generations == 0 {
                return node;
            }
            node.with_father(full(id * 2, generations - 1))
                .with_mother(full(id * 2 + 1, generations - 1))
        }
        let root = full(1, 8);
        let layout = layout::FamilyTreeLayout::with_defaults().layout_ancestors(&root, &[], &[]);

        assert_eq!(layout.nodes.len(), 511);
        assert_eq!(layout.edges.len(), 510);
        // 256 leaf columns
        assert_eq!(layout.width, 256.0 * 192.0 - 24.0 + 80.0);
        assert_eq!(layout.height, 9.0 * 130.0 - 60.0 + 80.0);
        assert!(layout.nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
    }
}
