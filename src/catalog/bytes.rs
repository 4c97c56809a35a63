//! Byte counts for index and table sizes

use std::fmt;

use serde::{Deserialize, Serialize};

/// One kibibyte
pub const KIB: i64 = 1024;
/// One mebibyte
pub const MIB: i64 = 1024 * KIB;
/// One gibibyte
pub const GIB: i64 = 1024 * MIB;
/// One tebibyte
pub const TIB: i64 = 1024 * GIB;

/// A count of bytes, as reported by `pg_relation_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bytes(pub i64);

impl Bytes {
    /// Builds a byte count from a whole number of mebibytes
    pub fn from_mib(mib: i64) -> Self {
        Bytes(mib.saturating_mul(MIB))
    }

    /// Raw byte count
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Size in mebibytes
    pub fn mib(&self) -> f64 {
        self.0 as f64 / MIB as f64
    }

    /// Human-readable size using the largest binary unit that fits.
    pub fn human(&self) -> String {
        let b = self.0;
        match b {
            b if b >= TIB => format!("{:.1} TiB", b as f64 / TIB as f64),
            b if b >= GIB => format!("{:.1} GiB", b as f64 / GIB as f64),
            b if b >= MIB => format!("{:.1} MiB", self.mib()),
            b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
            b => format!("{} B", b),
        }
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human())
    }
}
