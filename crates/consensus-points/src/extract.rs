use nalgebra::Point2;
use std::collections::BTreeMap;

/// One point extract: `"{tool}_x"` / `"{tool}_y"` keys mapping to
/// coordinate lists of one annotation.
pub type PointExtract = BTreeMap<String, Vec<f64>>;

/// Tool name of a coordinate key: `"T0_tool1_x"` -> `Some("T0_tool1")`.
///
/// Keys that do not end in `_x` or `_y` name no tool.
pub fn tool_name(key: &str) -> Option<&str> {
    key.strip_suffix("_x").or_else(|| key.strip_suffix("_y"))
}

/// Group the clicks of all extracts by tool.
///
/// Every tool named by any key appears in the result, possibly with no
/// points. An extract contributes to a tool only when it carries both
/// coordinate keys; unequal lists are paired up to the shorter one.
pub fn points_by_tool(extracts: &[PointExtract]) -> BTreeMap<String, Vec<Point2<f64>>> {
    let mut by_tool: BTreeMap<String, Vec<Point2<f64>>> = extracts
        .iter()
        .flat_map(|extract| extract.keys())
        .filter_map(|key| tool_name(key))
        .map(|tool| (tool.to_string(), Vec::new()))
        .collect();

    for (tool, points) in by_tool.iter_mut() {
        for extract in extracts {
            let xs = extract.get(&format!("{tool}_x"));
            let ys = extract.get(&format!("{tool}_y"));
            if let (Some(xs), Some(ys)) = (xs, ys) {
                points.extend(xs.iter().zip(ys).map(|(&x, &y)| Point2::new(x, y)));
            }
        }
    }
    by_tool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(pairs: &[(&str, &[f64])]) -> PointExtract {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn tool_names_strip_axis_suffix() {
        assert_eq!(tool_name("T0_toolIndex0_x"), Some("T0_toolIndex0"));
        assert_eq!(tool_name("point_y"), Some("point"));
        assert_eq!(tool_name("point_details"), None);
        assert_eq!(tool_name("x"), None);
    }

    #[test]
    fn groups_across_extracts() {
        let extracts = vec![
            extract(&[("a_x", &[1.0, 2.0]), ("a_y", &[3.0, 4.0])]),
            extract(&[("a_x", &[5.0]), ("a_y", &[6.0]), ("b_x", &[7.0]), ("b_y", &[8.0])]),
        ];
        let by_tool = points_by_tool(&extracts);
        assert_eq!(
            by_tool["a"],
            vec![
                Point2::new(1.0, 3.0),
                Point2::new(2.0, 4.0),
                Point2::new(5.0, 6.0)
            ]
        );
        assert_eq!(by_tool["b"], vec![Point2::new(7.0, 8.0)]);
    }

    #[test]
    fn half_keyed_tools_are_present_but_empty() {
        let extracts = vec![extract(&[("a_x", &[1.0])])];
        let by_tool = points_by_tool(&extracts);
        assert!(by_tool["a"].is_empty());
    }

    #[test]
    fn ragged_coordinates_pair_to_shorter() {
        let extracts = vec![extract(&[("a_x", &[1.0, 2.0, 3.0]), ("a_y", &[4.0])])];
        assert_eq!(points_by_tool(&extracts)["a"], vec![Point2::new(1.0, 4.0)]);
    }

    #[test]
    fn input_is_not_modified() {
        let extracts = vec![extract(&[("a_x", &[1.0]), ("a_y", &[2.0])])];
        let before = extracts.clone();
        let _ = points_by_tool(&extracts);
        assert_eq!(extracts, before);
    }
}
