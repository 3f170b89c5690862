use fxhash::FxHashMap;

use crate::{
    error::{NetworkError, NetworkResult},
    link_id::LinkId,
    types::{Category, TONS_SIGNIFICANCE, Tons},
};

/// Transport mode the tons originally belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TonMode {
    /// Carried by this mode from the start.
    Original,
    /// Moved here from another transport mode.
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TonKey {
    mode: TonMode,
    category: Category,
    od: LinkId,
}

/// Selects which stored tons are summed by [`LinkTons::get`]. An empty
/// criterion matches everything.
#[derive(Debug, Clone, Default)]
pub struct TonFilter {
    modes: Vec<TonMode>,
    categories: Vec<Category>,
    ods: Vec<LinkId>,
}

impl TonFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: TonMode) -> Self {
        self.modes.push(mode);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn od(mut self, od: LinkId) -> Self {
        self.ods.push(od.canonical());
        self
    }

    fn matches(&self, key: &TonKey) -> bool {
        (self.modes.is_empty() || self.modes.contains(&key.mode))
            && (self.categories.is_empty() || self.categories.contains(&key.category))
            && (self.ods.is_empty() || self.ods.contains(&key.od))
    }
}

/// Tons running on a link, split by mode, category and OD pair.
#[derive(Debug, Clone, Default)]
pub struct LinkTons {
    tons: FxHashMap<TonKey, Tons>,
}

impl LinkTons {
    pub fn get(&self, filter: &TonFilter) -> Tons {
        self.tons
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(_, tons)| tons)
            .sum()
    }

    pub fn total(&self) -> Tons {
        self.tons.values().sum()
    }

    pub fn original(&self) -> Tons {
        self.get(&TonFilter::all().mode(TonMode::Original))
    }

    pub fn derived(&self) -> Tons {
        self.get(&TonFilter::all().mode(TonMode::Derived))
    }

    pub fn add_original(&mut self, ton: Tons, category: Category, od: LinkId) {
        self.add(ton, TonMode::Original, category, od);
    }

    pub fn add_derived(&mut self, ton: Tons, category: Category, od: LinkId) {
        self.add(ton, TonMode::Derived, category, od);
    }

    pub fn remove_original(&mut self, ton: Tons, category: Category, od: LinkId) -> NetworkResult<()> {
        self.remove_mode(ton, TonMode::Original, category, od)
    }

    pub fn remove_derived(&mut self, ton: Tons, category: Category, od: LinkId) -> NetworkResult<()> {
        self.remove_mode(ton, TonMode::Derived, category, od)
    }

    /// Removes tons of an OD pair, taking derived tons first and original
    /// tons for the remainder.
    pub fn remove(&mut self, ton: Tons, category: Category, od: LinkId) -> NetworkResult<()> {
        let derived = self.stored(TonMode::Derived, category, od);
        let original = self.stored(TonMode::Original, category, od);

        if ton - (derived + original) > TONS_SIGNIFICANCE {
            return Err(NetworkError::InsufficientTons {
                requested: ton,
                available: derived + original,
            });
        }

        if ton < derived {
            self.remove_mode(ton, TonMode::Derived, category, od)
        } else if derived == 0.0 {
            self.remove_mode(ton, TonMode::Original, category, od)
        } else {
            self.tons.remove(&Self::key(TonMode::Derived, category, od));
            self.remove_mode(ton - derived, TonMode::Original, category, od)
        }
    }

    /// Drops every stored amount below `significance`.
    pub fn clean_insignificant(&mut self, significance: Tons) {
        self.tons.retain(|_, tons| *tons >= significance);
    }

    pub fn is_empty(&self) -> bool {
        self.tons.is_empty()
    }

    fn key(mode: TonMode, category: Category, od: LinkId) -> TonKey {
        TonKey {
            mode,
            category,
            od: od.canonical(),
        }
    }

    fn stored(&self, mode: TonMode, category: Category, od: LinkId) -> Tons {
        self.tons
            .get(&Self::key(mode, category, od))
            .copied()
            .unwrap_or(0.0)
    }

    fn add(&mut self, ton: Tons, mode: TonMode, category: Category, od: LinkId) {
        *self.tons.entry(Self::key(mode, category, od)).or_insert(0.0) += ton;
    }

    fn remove_mode(
        &mut self,
        ton: Tons,
        mode: TonMode,
        category: Category,
        od: LinkId,
    ) -> NetworkResult<()> {
        let key = Self::key(mode, category, od);
        let existing = self.tons.get(&key).copied().unwrap_or(0.0);

        // Removing (almost) everything clears the entry to absorb rounding
        if (ton - existing).abs() <= TONS_SIGNIFICANCE {
            self.tons.remove(&key);
            return Ok(());
        }

        if ton > existing {
            return Err(NetworkError::InsufficientTons {
                requested: ton,
                available: existing,
            });
        }

        self.tons.insert(key, existing - ton);
        Ok(())
    }
}

/// Original and derived tons carried by an OD pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OdTons {
    original: Tons,
    derived: Tons,
}

impl OdTons {
    pub fn new(original: Tons) -> Self {
        OdTons {
            original,
            derived: 0.0,
        }
    }

    pub fn original(&self) -> Tons {
        self.original
    }

    pub fn derived(&self) -> Tons {
        self.derived
    }

    pub fn total(&self) -> Tons {
        self.original + self.derived
    }

    pub fn add_original(&mut self, ton: Tons) {
        self.original += ton;
    }

    /// Moves tons to the same OD pair of another transport mode.
    ///
    /// `coeff` applies to the tons this mode would carry without any
    /// derivation (its own original tons plus those already derived to
    /// `other`), so calling it again with another coefficient adjusts the
    /// previous derivation instead of compounding it. Tons this side holds as
    /// derived are handed back to `other` as original tons.
    ///
    /// Returns the tons derived and the tons handed back.
    pub fn derive_to(&mut self, other: &mut OdTons, coeff: f64) -> NetworkResult<(Tons, Tons)> {
        let own_original = self.original + other.derived;
        let to_derive = own_original * coeff - other.derived;
        let to_return = self.derived;

        if to_derive - self.original > TONS_SIGNIFICANCE {
            return Err(NetworkError::InsufficientTons {
                requested: to_derive,
                available: self.original,
            });
        }

        self.original -= to_derive;
        self.derived -= to_return;

        other.derived += to_derive;
        other.original += to_return;

        Ok((to_derive, to_return))
    }
}
