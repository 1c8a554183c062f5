use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// DBpedia resource names use underscores; titles shown to the user do not.
pub fn display_label(query: &str) -> String {
    query.replace('_', " ")
}

pub fn format_relevance(relevance: f32) -> String {
    format!("{:.0}%", relevance.clamp(0.0, 1.0) * 100.0)
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_replaces_underscores() {
        assert_eq!(display_label("Eiffel_Tower"), "Eiffel Tower");
        assert_eq!(display_label("Paris"), "Paris");
    }

    #[test]
    fn format_relevance_clamps_and_rounds() {
        assert_eq!(format_relevance(0.874), "87%");
        assert_eq!(format_relevance(1.7), "100%");
        assert_eq!(format_relevance(-0.2), "0%");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("Paris");
        let (x2, y2) = stable_pair("Paris");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }
}
