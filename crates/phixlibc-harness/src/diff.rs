//! Line diff between expected and actual fixture output.

/// Render a line-by-line diff of `expected` against `actual`.
///
/// Lines present on only one side are shown against an empty counterpart.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let exp: Vec<&str> = expected.split('\n').collect();
    let act: Vec<&str> = actual.split('\n').collect();
    for i in 0..exp.len().max(act.len()) {
        let e = exp.get(i).copied();
        let a = act.get(i).copied();
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            if let Some(e) = e {
                out.push_str(&format!("-{e}\n"));
            }
            if let Some(a) = a {
                out.push_str(&format!("+{a}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        assert_eq!(render_diff("x", "x"), "[identical]");
    }

    #[test]
    fn single_line_change() {
        assert_eq!(
            render_diff("0X0", "0X"),
            "--- expected\n+++ actual\n@@ line 1 @@\n-0X0\n+0X\n"
        );
    }

    #[test]
    fn extra_actual_line() {
        let d = render_diff("a", "a\nb");
        assert!(d.ends_with("@@ line 2 @@\n+b\n"));
    }

    #[test]
    fn empty_expected() {
        assert_eq!(
            render_diff("", "0"),
            "--- expected\n+++ actual\n@@ line 1 @@\n-\n+0\n"
        );
    }
}
