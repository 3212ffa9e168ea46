//! The one-call entry point and its options.
//!
//! [`render`] takes a feature table and a [`ViewSpec`] and produces a
//! [`MapDocument`]: projection and framing resolved, the target column
//! classified into colors, tooltips and popups attached, legend derived.
//! [`render_onto`] appends the same output to an existing document instead.

use crate::classify::{classify, scheme::scheme_by_name};
use crate::core::crs::Crs;
use crate::core::feature::FeatureSet;
use crate::map::artifact::{MapDocument, VectorLayer};
use crate::map::compose::{compose_new, compose_onto, Composition};
use crate::pipeline::columns::resolve_columns;
use crate::pipeline::normalize::normalize;
use crate::pipeline::package::package;
use crate::style::palette::Palette;
use crate::style::resolve::StyleOverrides;
use crate::{Result, ViewError};

/// Options for one render call.
///
/// Defaults: no target column (uniform styling), `"quantiles"` scheme,
/// 5 bins, built-in palettes, tooltip and popup fields drawn from the
/// schema, no style overrides.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    column: Option<String>,
    scheme: String,
    bins: usize,
    palette: Option<Palette>,
    force_categorical: bool,
    tooltip: Option<Vec<String>>,
    popup: Option<Vec<String>>,
    overrides: StyleOverrides,
    fallback_crs: Option<Crs>,
    layer_name: String,
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self {
            column: None,
            scheme: "quantiles".to_string(),
            bins: 5,
            palette: None,
            force_categorical: false,
            tooltip: None,
            popup: None,
            overrides: StyleOverrides::default(),
            fallback_crs: None,
            layer_name: "features".to_string(),
        }
    }
}

impl ViewSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column to visualize; absent means one uniform style for all features
    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Classification scheme name, e.g. `"quantiles"` or `"natural-breaks"`
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Requested bin count for continuous columns; clamped to the number of
    /// distinct values at classification time
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Ordered color sequence consumed by the classifier
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Treats a numeric target column as discrete categories
    pub fn categorical(mut self) -> Self {
        self.force_categorical = true;
        self
    }

    /// Explicit tooltip fields, replacing the schema-order default
    pub fn with_tooltip(mut self, fields: &[&str]) -> Self {
        self.tooltip = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Explicit popup fields, replacing the schema-order default
    pub fn with_popup(mut self, fields: &[&str]) -> Self {
        self.popup = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Fixed style values that win over classification-derived colors
    pub fn with_style(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// CRS assumed when the feature set does not declare one
    pub fn with_fallback_crs(mut self, crs: Crs) -> Self {
        self.fallback_crs = Some(crs);
        self
    }

    /// Name of the appended layer, shown in the layer control
    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    pub(crate) fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub(crate) fn forced_categorical(&self) -> bool {
        self.force_categorical
    }

    pub(crate) fn tooltip_columns(&self) -> Option<&[String]> {
        self.tooltip.as_deref()
    }

    pub(crate) fn popup_columns(&self) -> Option<&[String]> {
        self.popup.as_deref()
    }

    /// Checked before any stage runs
    fn validate(&self) -> Result<()> {
        if scheme_by_name(&self.scheme).is_none() {
            return Err(ViewError::UnknownScheme(self.scheme.clone()));
        }
        Ok(())
    }
}

/// Renders `set` onto a fresh map
pub fn render(set: &FeatureSet, spec: &ViewSpec) -> Result<MapDocument> {
    Ok(compose_new(build(set, spec)?))
}

/// Renders `set` onto an existing map, appending one layer
pub fn render_onto(set: &FeatureSet, spec: &ViewSpec, document: &mut MapDocument) -> Result<()> {
    let composition = build(set, spec)?;
    compose_onto(document, composition);
    Ok(())
}

/// Runs the resolution pipeline and returns the composition for assembly
fn build(set: &FeatureSet, spec: &ViewSpec) -> Result<Composition> {
    spec.validate()?;

    let normalized = normalize(set, spec.fallback_crs)?;
    let columns = resolve_columns(normalized.features.as_ref(), spec)?;
    let classification = classify(
        normalized.features.as_ref(),
        &columns,
        &spec.scheme,
        spec.bins,
        spec.palette.as_ref(),
    )?;
    let (styled, legend) = package(
        normalized.features.as_ref(),
        &columns,
        &classification,
        &spec.overrides,
    )?;

    Ok(Composition {
        bounds: normalized.bounds,
        layer: VectorLayer {
            name: spec.layer_name.clone(),
            features: styled.into_iter().map(Into::into).collect(),
        },
        legend,
    })
}
