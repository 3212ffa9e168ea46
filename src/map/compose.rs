//! Final assembly: framing, layers, legend, and the layer control.

use crate::core::geo::LatLngBounds;
use crate::map::artifact::{MapDocument, VectorLayer};
use crate::pipeline::package::Legend;

/// Everything one render call contributes to a map
#[derive(Debug, Clone)]
pub struct Composition {
    pub bounds: LatLngBounds,
    pub layer: VectorLayer,
    pub legend: Option<Legend>,
}

/// Creates a fresh map framed to the composition and appends it
pub fn compose_new(composition: Composition) -> MapDocument {
    let mut document = MapDocument::new(&composition.bounds);
    append(&mut document, composition);
    document
}

/// Appends onto a caller-supplied map, refitting the framing to the union
/// of all content. The document is borrowed for exactly this call.
pub fn compose_onto(document: &mut MapDocument, composition: Composition) {
    let bounds = match document.content_bounds() {
        Some(existing) => existing.union(&composition.bounds),
        None => composition.bounds.clone(),
    };
    append(document, composition);
    document.fit_bounds(&bounds);
}

fn append(document: &mut MapDocument, composition: Composition) {
    log::debug!(
        "appending layer '{}' with {} features",
        composition.layer.name,
        composition.layer.features.len()
    );
    document.add_layer(composition.layer);
    if let Some(legend) = composition.legend {
        document.set_legend(legend);
    }
}
