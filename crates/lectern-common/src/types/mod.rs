mod core;

pub use self::core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_clone_and_equality() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(0.0, 0.0, 612.0, 792.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn rect_geometry() {
        let r = Rect::new(10.0, 20.0, 40.0, 10.0);
        assert_eq!(r.bottom(), 30.0);
        assert_eq!(r.mid_y(), 25.0);
        assert_eq!(r.center_x(), 30.0);
        assert!(r.spans_y(20.0));
        assert!(r.spans_y(30.0));
        assert!(!r.spans_y(30.5));
    }

    #[test]
    fn zero_area_requires_both_dimensions() {
        assert!(Rect::default().is_zero_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 12.0).is_zero_area());
        assert!(!Rect::new(0.0, 0.0, 5.0, 0.0).is_zero_area());
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(42).to_string(), "node-42");
    }

    #[test]
    fn node_id_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(NodeId(1));
        set.insert(NodeId(2));
        set.insert(NodeId(1));
        assert_eq!(set.len(), 2);
    }
}
