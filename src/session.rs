use tracing::{debug, warn};

use crate::{
    bar::{BarSelection, BarSpec, CustomBar},
    calculator::{self, Fill},
    catalog::PlateCatalog,
    ledger::InventoryLedger,
    loadout::Loadout,
    plate::Plate,
    session_error::SessionError,
    unit::{Precision, Unit},
};

/// Everything the user has set up: unit, bar, mounted plates, inventory and
/// custom bars. Owned by the application shell; every operation runs to
/// completion and leaves the session in a valid state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub(crate) unit: Unit,
    pub(crate) bar: BarSelection,
    pub(crate) loadout: Loadout,
    pub(crate) ledger: InventoryLedger,
    pub(crate) precision: Precision,
    pub(crate) custom_bars: Vec<CustomBar>,
}

impl Session {
    #[must_use]
    pub fn new(unit: Unit, precision: Precision) -> Self {
        Session {
            unit,
            precision,
            ..Session::default()
        }
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn selection(&self) -> &BarSelection {
        &self.bar
    }

    #[must_use]
    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    #[must_use]
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    #[must_use]
    pub fn custom_bars(&self) -> &[CustomBar] {
        &self.custom_bars
    }

    #[must_use]
    pub fn catalog(&self) -> &'static PlateCatalog {
        PlateCatalog::for_unit(self.unit)
    }

    /// The selected bar, or the default bar when the selection is stale.
    #[must_use]
    pub fn bar(&self) -> BarSpec {
        BarSpec::resolve(&self.bar, &self.custom_bars, self.unit, self.precision)
            .unwrap_or_else(|| BarSpec::standard(Default::default(), self.unit))
    }

    /// Resets a selection pointing at a deleted custom bar to the default
    /// bar. Returns true when a reset happened and the session needs saving.
    pub fn heal_selection(&mut self) -> bool {
        if BarSpec::resolve(&self.bar, &self.custom_bars, self.unit, self.precision).is_some() {
            return false;
        }
        warn!(bar = %self.bar, "selected bar not found, resetting to default");
        self.bar = BarSelection::default();
        true
    }

    #[must_use]
    pub fn bar_weight(&self) -> f64 {
        self.bar().weight_in(self.unit, self.precision)
    }

    #[must_use]
    pub fn side_weight(&self) -> f64 {
        self.loadout.side_weight()
    }

    /// Plate weight across both sides.
    #[must_use]
    pub fn plates_weight(&self) -> f64 {
        self.side_weight() * 2.0
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.bar_weight() + self.plates_weight()
    }

    /// Plates of `plate`'s denomination not on the bar.
    #[must_use]
    pub fn available_pairs(&self, plate: Plate) -> i64 {
        self.ledger.available_pairs(plate, &self.loadout)
    }

    #[must_use]
    pub fn can_add(&self, plate: Plate) -> bool {
        self.available_pairs(plate) >= 2
    }

    fn plate(&self, weight: f64) -> Result<Plate, SessionError> {
        self.catalog()
            .find(weight)
            .ok_or(SessionError::UnknownPlate(weight, self.unit))
    }

    /// Mounts a pair of `weight` plates.
    ///
    /// # Errors
    /// If the weight is not in the current catalog or fewer than two plates
    /// of it are left.
    pub fn add_plate(&mut self, weight: f64) -> Result<Plate, SessionError> {
        let plate = self.plate(weight)?;
        if !self.can_add(plate) {
            return Err(SessionError::NoPairAvailable(plate));
        }
        self.loadout.push(plate);
        debug!(%plate, loadout = %self.loadout, "added pair");
        Ok(plate)
    }

    /// Unmounts one pair of `weight` plates. Returns false if none is mounted.
    pub fn remove_plate(&mut self, weight: f64) -> bool {
        let Ok(plate) = self.plate(weight) else {
            return false;
        };
        let removed = self.loadout.remove(plate);
        if removed {
            debug!(%plate, loadout = %self.loadout, "removed pair");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.loadout.clear();
        debug!("cleared loadout");
    }

    fn validate_target(&self, target: f64) -> Result<f64, SessionError> {
        if !target.is_finite() || target < 0.0 {
            return Err(SessionError::InvalidTarget(target));
        }
        let bar = self.bar_weight();
        if target < bar {
            return Err(SessionError::BelowBar { target, bar });
        }
        Ok(bar)
    }

    /// Best-fit loadout for `target` without touching the session.
    ///
    /// # Errors
    /// If the target is not a non-negative number or is below the bar.
    pub fn preview(&self, target: f64) -> Result<Fill, SessionError> {
        let bar = self.validate_target(target)?;
        Ok(calculator::fill(target, bar, self.catalog(), &self.ledger))
    }

    /// Replaces the loadout with the best fit for `target`. On error the
    /// loadout is left as it was.
    ///
    /// # Errors
    /// If the target is not a non-negative number or is below the bar.
    pub fn calculate(&mut self, target: f64) -> Result<Fill, SessionError> {
        self.heal_selection();
        let fill = self.preview(target)?;
        self.loadout = fill.loadout.clone();
        debug!(target_weight = target, loadout = %self.loadout, shortfall = fill.shortfall(), "calculated loadout");
        Ok(fill)
    }

    /// Switches unit system. Mounted plates belong to the old catalog, so the
    /// loadout is cleared.
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
        self.loadout.clear();
        debug!(%unit, "switched unit");
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
        debug!(%precision, "switched precision");
    }

    /// Selects a bar by id and clears the loadout.
    ///
    /// # Errors
    /// If `id` names neither a standard bar nor an existing custom bar.
    pub fn select_bar(&mut self, id: &str) -> Result<BarSpec, SessionError> {
        let selection =
            BarSelection::parse(id).ok_or_else(|| SessionError::UnknownBar(id.to_string()))?;
        let spec = BarSpec::resolve(&selection, &self.custom_bars, self.unit, self.precision)
            .ok_or_else(|| SessionError::UnknownBar(id.to_string()))?;
        self.bar = selection;
        self.loadout.clear();
        debug!(bar = %spec.display_name, "selected bar");
        Ok(spec)
    }

    /// # Errors
    /// If the name or weight fail validation.
    pub fn add_custom_bar(
        &mut self,
        name: &str,
        weight: f64,
        unit: Unit,
    ) -> Result<&CustomBar, SessionError> {
        let bar = CustomBar::create(name, weight, unit, &self.custom_bars)?;
        debug!(id = %bar.id, name = %bar.name, "created custom bar");
        self.custom_bars.push(bar);
        Ok(&self.custom_bars[self.custom_bars.len() - 1])
    }

    /// Deletes a custom bar. Deleting the selected bar falls back to the
    /// default bar. Returns false if no bar has that id.
    pub fn delete_custom_bar(&mut self, id: &str) -> bool {
        let before = self.custom_bars.len();
        self.custom_bars.retain(|bar| bar.id != id);
        if self.custom_bars.len() == before {
            return false;
        }
        if self.bar.id() == id {
            self.bar = BarSelection::default();
        }
        debug!(id, "deleted custom bar");
        true
    }

    /// Sets the on-hand count of a denomination in `unit`, clamped into the
    /// ledger's range. Mounted plates stay mounted.
    ///
    /// # Errors
    /// If `weight` is not in that unit's catalog.
    pub fn set_inventory(&mut self, unit: Unit, weight: f64, count: i64) -> Result<u32, SessionError> {
        let plate = PlateCatalog::for_unit(unit)
            .find(weight)
            .ok_or(SessionError::UnknownPlate(weight, unit))?;
        let stored = self.ledger.set_count(plate, count);
        debug!(%plate, count = stored, "set inventory");
        Ok(stored)
    }
}
