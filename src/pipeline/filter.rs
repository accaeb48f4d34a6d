//! Filter engine

use crate::models::{FilterSelection, View};

/// Rows of `view` admitted by `selection`, in their original order.
///
/// An empty severity set admits nothing.
pub fn filter<'a>(view: &View<'a>, selection: &FilterSelection) -> View<'a> {
    view.retain_where(|record| selection.admits(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample_dataset;
    use crate::models::SegmentChoice;

    #[test]
    fn test_filter_by_severity() {
        let dataset = sample_dataset();
        let selection = FilterSelection::new(["Critical"], SegmentChoice::All);

        let view = filter(&dataset.view(), &selection);

        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.severity == "Critical"));
        assert!(std::ptr::eq(view.rows()[0], &dataset.records()[0]));
        assert!(std::ptr::eq(view.rows()[1], &dataset.records()[2]));
    }

    #[test]
    fn test_filter_by_segment() {
        let dataset = sample_dataset();
        let selection = FilterSelection::new(
            ["Critical", "Low"],
            SegmentChoice::Only("SysA".to_string()),
        );

        let view = filter(&dataset.view(), &selection);

        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.affected_system == "SysA"));
    }

    #[test]
    fn test_empty_severity_set_yields_empty_view() {
        let dataset = sample_dataset();
        let selection = FilterSelection::new(Vec::<String>::new(), SegmentChoice::All);

        assert!(filter(&dataset.view(), &selection).is_empty());
    }

    #[test]
    fn test_default_selection_keeps_everything() {
        let dataset = sample_dataset();
        let view = filter(&dataset.view(), &FilterSelection::all(&dataset));

        assert_eq!(view, dataset.view());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dataset = sample_dataset();
        let selection = FilterSelection::new(["Critical"], SegmentChoice::Only("SysB".to_string()));

        let once = filter(&dataset.view(), &selection);
        let twice = filter(&once, &selection);

        assert_eq!(once.len(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_segment_matches_nothing() {
        let dataset = sample_dataset();
        let selection = FilterSelection::new(["Critical", "Low"], SegmentChoice::Only("sysa".to_string()));

        assert!(filter(&dataset.view(), &selection).is_empty());
    }
}
