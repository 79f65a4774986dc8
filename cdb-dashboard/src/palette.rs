/// Qualitative colour sequence used for every categorical chart.
pub const BASE_PALETTE: [&str; 10] = [
    "#60A5FA", "#F59E0B", "#10B981", "#EF4444", "#8B5CF6", "#EC4899", "#3B82F6", "#F43F5E",
    "#22C55E", "#EAB308",
];

/// The first `n` colours of the base sequence, wrapping around as needed.
///
/// Same `n`, same colours: a re-render of the same field never shifts hues.
pub fn palette(n: usize) -> Vec<String> {
    BASE_PALETTE
        .iter()
        .cycle()
        .take(n)
        .map(|c| c.to_string())
        .collect()
}
