//! Stable accent color assignment for groups
//!
//! A pure hash of the group id, so the same group keeps its color across
//! renders, sessions and item orderings without any shared registry.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Palette slot for a group: FNV-1a of the id modulo `palette_size`.
///
/// An empty palette maps every group to slot 0.
pub fn color_for_group(group_id: &str, palette_size: usize) -> usize {
    if palette_size == 0 {
        return 0;
    }
    let hash = group_id
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME));
    (hash % palette_size as u64) as usize
}
