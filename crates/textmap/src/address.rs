//! Address codec: dot-delimited child-index paths.
//!
//! An address names a tree position by the child index taken at each depth;
//! the empty string is the root. Addresses are only meaningful against the
//! tree shape current at the most recent remap.

use crate::error::Error;

pub fn encode(path: &[usize]) -> String {
    path.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

pub fn decode(address: &str) -> Result<Vec<usize>, Error> {
    if address.is_empty() {
        return Ok(Vec::new());
    }
    address
        .split('.')
        .map(|segment| {
            segment
                .parse::<usize>()
                .map_err(|_| Error::MalformedAddress(segment.to_string()))
        })
        .collect()
}
