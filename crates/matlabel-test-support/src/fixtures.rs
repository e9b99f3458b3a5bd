//! Sample label data.

/// Representative label records as `(code, description)` pairs.
pub const SAMPLE_LABELS: &[(&str, &str)] = &[
    ("VG0100", "Polypropylene homopolymer\nNatural"),
    ("AB220", "ABS general purpose, black"),
    ("PC15", "Polycarbonate clear"),
    ("NY6", "Nylon 6, 30% glass filled"),
];

/// Bulk import text mixing valid rows, a blank line, a code without a
/// description, and a duplicate of the first row.
pub const SAMPLE_BULK: &str = "\
PE900   High density polyethylene
PS12 Polystyrene crystal

POM4
pe900 duplicate in a different case
TPU7 Thermoplastic polyurethane 85A
";

/// Rows in [`SAMPLE_BULK`] that should be added on an empty store.
pub const SAMPLE_BULK_ADDED: usize = 3;

/// Rows in [`SAMPLE_BULK`] that collide with earlier rows.
pub const SAMPLE_BULK_SKIPPED: usize = 1;

/// Rows in [`SAMPLE_BULK`] missing a description.
pub const SAMPLE_BULK_REJECTED: usize = 1;

/// Render [`SAMPLE_LABELS`] in bulk import format.
#[must_use]
pub fn sample_labels_as_bulk() -> String {
    SAMPLE_LABELS
        .iter()
        .map(|(code, description)| format!("{code} {}\n", description.replace('\n', " ")))
        .collect()
}
