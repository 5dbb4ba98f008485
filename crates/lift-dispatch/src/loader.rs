//! CSV arrival-seed loader.
//!
//! # CSV format
//!
//! One row per passenger group released at time zero.
//!
//! ```csv
//! floor,group_size
//! 0,12
//! 3,4
//! 7,2
//! ```
//!
//! Rows are returned in file order, which is also the order passengers are
//! created in.  Floor bounds are not checked here; `BuildingConfig::validate`
//! does that once the floor count is known.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lift_core::{ArrivalSeed, FloorId};

use crate::DispatchError;

#[derive(Deserialize)]
struct SeedRecord {
    floor:      u16,
    group_size: u32,
}

/// Load arrival seeds from a CSV file.
pub fn load_seeds_csv(path: &Path) -> Result<Vec<ArrivalSeed>, DispatchError> {
    let file = std::fs::File::open(path).map_err(DispatchError::Io)?;
    load_seeds_reader(file)
}

/// Like [`load_seeds_csv`] but accepts any `Read` source.
pub fn load_seeds_reader<R: Read>(reader: R) -> Result<Vec<ArrivalSeed>, DispatchError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<SeedRecord>()
        .map(|result| {
            let row = result.map_err(|e| DispatchError::Parse(e.to_string()))?;
            Ok(ArrivalSeed { floor: FloorId(row.floor), group_size: row.group_size })
        })
        .collect()
}
