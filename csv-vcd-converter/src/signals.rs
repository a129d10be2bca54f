//! Signal table and symbol allocation
//!
//! Every signal gets a one-character VCD identifier from the printable ASCII
//! range `!` (33) through `~` (126), assigned in header column order.

use crate::types::{ConvertError, Result};

/// First identifier in the symbol pool
const FIRST_SYMBOL: u8 = b'!';
/// Last identifier in the symbol pool
const LAST_SYMBOL: u8 = b'~';

/// Number of single-character identifiers available
pub const SYMBOL_POOL_SIZE: usize = (LAST_SYMBOL - FIRST_SYMBOL + 1) as usize;

/// A named signal and its VCD identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: String,
    pub symbol: char,
}

/// Signals indexed by CSV column position (after the timestamp column)
///
/// Built once per conversion; the name-to-symbol mapping never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalTable {
    signals: Vec<Signal>,
}

impl SignalTable {
    /// Assign symbols to `names` in order
    ///
    /// Fails with `CapacityExceeded` when there are more names than symbols.
    pub fn allocate(names: Vec<String>) -> Result<Self> {
        if names.len() > SYMBOL_POOL_SIZE {
            return Err(ConvertError::CapacityExceeded {
                signals: names.len(),
                capacity: SYMBOL_POOL_SIZE,
            });
        }

        let signals = names
            .into_iter()
            .zip(FIRST_SYMBOL..=LAST_SYMBOL)
            .map(|(name, code)| Signal {
                name,
                symbol: code as char,
            })
            .collect::<Vec<_>>();

        for signal in &signals {
            log::debug!("Signal '{}' -> symbol '{}'", signal.name, signal.symbol);
        }

        Ok(Self { signals })
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signal> {
        self.signals.iter()
    }
}

impl<'a> IntoIterator for &'a SignalTable {
    type Item = &'a Signal;
    type IntoIter = std::slice::Iter<'a, Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.signals.iter()
    }
}
