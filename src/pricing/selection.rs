//! Typed booking selection.
//!
//! Replaces the loosely shaped "selections" JSON with a value that can be
//! validated before it reaches the engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::PricingModel;

/// Structural problems with a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("BOGOF needs as many free areas as paid areas ({paid} paid, {free} free)")]
    BogofCountMismatch { paid: usize, free: usize },

    #[error("area {0} is selected as both paid and free")]
    BogofOverlap(Uuid),

    #[error("area {0} is selected more than once")]
    DuplicateArea(Uuid),

    #[error("free areas are only available with BOGOF bookings, not {0}")]
    FreeAreasNotAllowed(PricingModel),
}

/// What the advertiser has picked so far.
///
/// For BOGOF bookings `area_ids` are the paid areas and `free_area_ids` the
/// matching free ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub ad_size_id: Option<Uuid>,
    #[serde(default)]
    pub duration_id: Option<Uuid>,
    #[serde(default)]
    pub area_ids: Vec<Uuid>,
    #[serde(default)]
    pub free_area_ids: Vec<Uuid>,
    #[serde(default)]
    pub needs_design: bool,
}

impl Selection {
    /// A fixed, subscription or leafleting selection.
    pub fn new(
        pricing_model: PricingModel,
        ad_size_id: Uuid,
        duration_id: Uuid,
        area_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            pricing_model,
            ad_size_id: Some(ad_size_id),
            duration_id: Some(duration_id),
            area_ids,
            free_area_ids: Vec::new(),
            needs_design: false,
        }
    }

    /// A BOGOF selection; rejected unless paid and free areas pair up.
    pub fn bogof(
        ad_size_id: Uuid,
        duration_id: Uuid,
        paid_area_ids: Vec<Uuid>,
        free_area_ids: Vec<Uuid>,
    ) -> Result<Self, SelectionError> {
        let selection = Self {
            pricing_model: PricingModel::Bogof,
            ad_size_id: Some(ad_size_id),
            duration_id: Some(duration_id),
            area_ids: paid_area_ids,
            free_area_ids,
            needs_design: false,
        };
        selection.validate()?;
        Ok(selection)
    }

    pub fn with_design(mut self, needs_design: bool) -> Self {
        self.needs_design = needs_design;
        self
    }

    /// The chosen ad size and duration, once every input the engine needs
    /// has been picked.
    pub fn choices(&self) -> Option<(Uuid, Uuid)> {
        if self.area_ids.is_empty() {
            return None;
        }
        self.ad_size_id.zip(self.duration_id)
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        let mut seen = HashSet::new();
        for id in &self.area_ids {
            if !seen.insert(*id) {
                return Err(SelectionError::DuplicateArea(*id));
            }
        }

        if self.pricing_model != PricingModel::Bogof {
            if self.free_area_ids.is_empty() {
                return Ok(());
            }
            return Err(SelectionError::FreeAreasNotAllowed(self.pricing_model));
        }

        let mut free_seen = HashSet::new();
        for id in &self.free_area_ids {
            if seen.contains(id) {
                return Err(SelectionError::BogofOverlap(*id));
            }
            if !free_seen.insert(*id) {
                return Err(SelectionError::DuplicateArea(*id));
            }
        }

        if self.area_ids.len() != self.free_area_ids.len() {
            return Err(SelectionError::BogofCountMismatch {
                paid: self.area_ids.len(),
                free: self.free_area_ids.len(),
            });
        }

        Ok(())
    }
}
