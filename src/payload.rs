//! Webhook payload resolution.
//!
//! Downstream CRM and fulfilment systems never see catalog UUIDs; this pass
//! swaps them for names before a quote leaves the system. It runs after
//! pricing and never changes a price.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{Catalog, PricingModel};
use crate::pricing::Selection;

/// Selection with catalog ids resolved to display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    pub pricing_model: PricingModel,
    pub ad_size: Option<String>,
    pub duration: Option<String>,
    pub areas: Vec<String>,
    pub free_areas: Vec<String>,
    pub needs_design: bool,
}

/// Resolve ids to names; unknown ids pass through as their raw id string.
pub fn resolve_selection(selection: &Selection, catalog: &Catalog) -> ResolvedSelection {
    let model = selection.pricing_model;

    let ad_size = selection.ad_size_id.map(|id| {
        catalog
            .ad_size(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|_| unresolved("ad size", id))
    });

    let duration = selection.duration_id.map(|id| {
        catalog
            .duration_for(model, id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|_| unresolved("duration", id))
    });

    ResolvedSelection {
        pricing_model: model,
        ad_size,
        duration,
        areas: area_names(catalog, &selection.area_ids),
        free_areas: area_names(catalog, &selection.free_area_ids),
        needs_design: selection.needs_design,
    }
}

fn area_names(catalog: &Catalog, ids: &[Uuid]) -> Vec<String> {
    ids.iter()
        .map(|id| {
            catalog
                .area(*id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|_| unresolved("area", *id))
        })
        .collect()
}

fn unresolved(kind: &str, id: Uuid) -> String {
    warn!("Payload {} {} not in catalog; sending raw id", kind, id);
    id.to_string()
}
