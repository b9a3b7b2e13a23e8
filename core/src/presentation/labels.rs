//! Vertex display labels: A, B, ..., Z, AA, AB, ...

use crate::algorithm::traits::NodeId;

/// Spreadsheet-style label for a 0-based vertex index
pub fn vertex_label(index: NodeId) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        remaining -= 1;
        letters.push(b'A' + (remaining % 26) as u8);
        remaining /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Labels of `tour` joined by arrows
pub fn format_route(tour: &[NodeId]) -> String {
    tour.iter()
        .map(|&v| vertex_label(v))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(vertex_label(0), "A");
        assert_eq!(vertex_label(3), "D");
        assert_eq!(vertex_label(25), "Z");
    }

    #[test]
    fn test_wraps_to_two_letters() {
        assert_eq!(vertex_label(26), "AA");
        assert_eq!(vertex_label(27), "AB");
        assert_eq!(vertex_label(701), "ZZ");
        assert_eq!(vertex_label(702), "AAA");
    }

    #[test]
    fn test_route() {
        assert_eq!(format_route(&[0, 2, 1, 0]), "A -> C -> B -> A");
        assert_eq!(format_route(&[]), "");
    }
}
