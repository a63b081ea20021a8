use proptest::prelude::*;
use pysnip::{evaluate, run};

fn python_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(lines in prop::collection::vec("\\PC{0,40}", 0..6)) {
        let source = lines.join("\n");
        let _ = run(&source);
    }

    #[test]
    fn integer_lists_print_like_python(values in prop::collection::vec(-1000i64..1000, 0..12)) {
        let literal = python_list(&values);
        let output = run(&format!("name = {literal}\nprint(name)"));
        prop_assert_eq!(output, literal);
    }

    #[test]
    fn sorted_never_mutates_and_sort_always_does(values in prop::collection::vec(-50i64..50, 0..12)) {
        let literal = python_list(&values);
        let mut expected = values.clone();
        expected.sort_unstable();

        let output = run(&format!("x = {literal}\ny = sorted(x)\nprint(x)\nprint(y)"));
        prop_assert_eq!(output, format!("{literal}\n{}", python_list(&expected)));

        let output = run(&format!("x = {literal}\nx.sort()\nprint(x)"));
        prop_assert_eq!(output, python_list(&expected));
    }

    #[test]
    fn evaluation_is_idempotent(values in prop::collection::vec(-50i64..50, 1..8), extra in -50i64..50) {
        let source = format!("xs = {}\nxs.append({extra})\nxs.sort(reverse=True)\nprint(xs, len(xs), max(xs))",
                             python_list(&values));
        let first = evaluate(&source).unwrap();
        let second = evaluate(&source).unwrap();
        prop_assert_eq!(first.output, second.output);
        prop_assert_eq!(first.variables, second.variables);
    }

    #[test]
    fn sum_matches_integer_addition(values in prop::collection::vec(-10_000i64..10_000, 0..20)) {
        let output = run(&format!("xs = {}\nprint(sum(xs))", python_list(&values)));
        prop_assert_eq!(output, values.iter().sum::<i64>().to_string());
    }
}
