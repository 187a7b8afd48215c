use crate::result::ErrorNode;

const INDENT: &str = "  ";

pub fn format_errors(errors: &[ErrorNode]) -> String {
    let mut lines = Vec::new();
    collect_lines(errors, 0, &mut lines);
    lines.join("\n")
}

fn collect_lines(errors: &[ErrorNode], depth: usize, lines: &mut Vec<String>) {
    for error in errors {
        match error {
            ErrorNode::Leaf(message) => {
                lines.push(format!("{}{}", INDENT.repeat(depth), message));
            }
            ErrorNode::Group(nested) => collect_lines(nested, depth + 1, lines),
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn format_errors_indents_by_depth() {
        let errors = vec![
            ErrorNode::leaf("invalid robot children: joint"),
            ErrorNode::Group(vec![
                ErrorNode::leaf("invalid attribute: \"type\""),
                ErrorNode::Group(vec![ErrorNode::leaf("missing")]),
            ]),
            ErrorNode::leaf("invalid robot children: link"),
        ];
        assert_eq!(
            format_errors(&errors),
            "invalid robot children: joint\n  invalid attribute: \"type\"\n    missing\ninvalid robot children: link"
        );
    }

    #[test]
    fn format_errors_of_empty_list_is_empty() {
        assert_eq!(format_errors(&[]), "");
    }

    #[test]
    fn empty_groups_produce_no_lines() {
        let errors = vec![ErrorNode::Group(Vec::new()), ErrorNode::leaf("no match")];
        assert_eq!(format_errors(&errors), "no match");
    }
}
