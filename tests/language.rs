use std::fs;

use pretty_assertions::assert_eq;
use pysnip::{
    ERROR_MESSAGE, evaluate, evaluate_with,
    grammar::{Feature, Grammar},
    interpreter::{evaluator::core::Operation, value::core::Value},
    run, run_with,
};
use walkdir::WalkDir;

#[test]
fn snippet_files_produce_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/snippets").into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| {
                                                   e.path().extension().is_some_and(|ext| ext == "py")
                                               })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        assert_eq!(run(&source), expected.trim_end_matches('\n'), "snippet {path:?}");
    }

    assert!(count > 0, "No snippets found in tests/snippets");
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(run(src), expected, "snippet:\n{src}");
}

#[test]
fn list_literals_print_like_python() {
    assert_output("name = [1, 2, 3]\nprint(name)", "[1, 2, 3]");
    assert_output("name = [\"a\", \"b\"]\nprint(name)", "['a', 'b']");
    assert_output("empty = []\nprint(empty)", "[]");
    assert_output("mixed = [1, 2.5, \"it's\", True, None]\nprint(mixed)",
                  "[1, 2.5, \"it's\", True, None]");
}

#[test]
fn sorted_copies_and_sort_mutates() {
    assert_output("x = [3, 1, 2]\ny = sorted(x)\nprint(x)\nprint(y)", "[3, 1, 2]\n[1, 2, 3]");
    assert_output("x = [3, 1, 2]\nx.sort()\nprint(x)", "[1, 2, 3]");
    assert_output("x = [3, 1, 2]\ny = sorted(x, reverse=True)\nprint(y)", "[3, 2, 1]");
    assert_output("x = [\"pear\", \"apple\", \"fig\"]\nx.sort(reverse=True)\nprint(x)",
                  "['pear', 'fig', 'apple']");
}

#[test]
fn aggregates() {
    let src = "scores = [78, 92, 85, 96, 88]\nprint(max(scores))\nprint(min(scores))";
    assert_output(src, "96\n78");
    assert_output("sales = [100, 250, 175, 325]\nprint(sum(sales))", "850");
    assert_output("xs = [1, 2]\nprint(f\"Total: {sum(xs):.2f}\")", "Total: 3.00");
    assert_output("print(max(3, 9, 4))", "9");
}

#[test]
fn count_len_and_concatenation() {
    let src = "fruits = [\"apple\", \"banana\", \"apple\", \"orange\", \"apple\"]
print(fruits.count(\"apple\"))
print(len(fruits))";
    assert_output(src, "3\n5");
    assert_output("a = [1, 2, 3]\nb = [4, 5, 6]\nprint(len(a + b))", "6");
    assert_output("a = [1]\nc = a + [2]\nprint(c)", "[1, 2]");
}

#[test]
fn malformed_lines_are_silent() {
    assert_output("foo === bar", "");
    assert_output("print(\"before\")\nfoo === bar\nprint(\"after\")", "before\nafter");
    assert_output("x = 5\nx\nprint(x)", "5");
    assert_output("print(unknown_function(1))\nprint(\"ok\")", "ok");
}

#[test]
fn runtime_errors_replace_all_output() {
    assert_output("print(\"partial\")\nprint(max(undefined))", ERROR_MESSAGE);
    assert_output("xs = []\nprint(max(xs))", ERROR_MESSAGE);
    assert_output("xs = [1]\nprint(xs[5])", ERROR_MESSAGE);
    assert_output("print(1 / 0)", ERROR_MESSAGE);
    assert_output("xs = [1]\nxs.index(2)", ERROR_MESSAGE);
}

#[test]
fn evaluation_is_idempotent() {
    let src = "xs = [2, 1]\nxs.append(3)\nxs.sort()\nprint(xs)\nprint(f\"{len(xs)} items\")";
    assert_eq!(run(src), run(src));
    assert_eq!(evaluate(src).unwrap().output, evaluate(src).unwrap().output);
}

#[test]
fn list_methods() {
    let src = "\
xs = [10, 20, 30]
xs.insert(1, 15)
last = xs.pop()
xs.remove(10)
xs.remove(99)
xs.extend([40, 50])
print(xs)
print(last)
print(xs.index(40))
xs.reverse()
print(xs)
xs.clear()
print(xs)";
    assert_output(src, "[15, 20, 40, 50]\n30\n2\n[50, 40, 20, 15]\n[]");
}

#[test]
fn printing_and_strings() {
    assert_output("name = \"Ada\"\nprint(\"Hello\", name)", "Hello Ada");
    assert_output("print(\"Score: \" + 96)", "Score: 96");
    assert_output("print(\"a\", \"b\", sep=\", \")", "a, b");
    assert_output("print(f\"{{braces}} {1 + 1}\")", "{braces} 2");
    assert_output("print(\"tab\\there\")", "tab\there");
    assert_output("word = \"python\"\nprint(word[0] + word[-1])\nprint(word[1:3])", "pn\nyt");
}

#[test]
fn numbers_format_like_python() {
    assert_output("print(5 / 2)\nprint(4 / 2)\nprint(7 // 2)\nprint(-7 % 3)", "2.5\n2.0\n3\n2");
    assert_output("print(0.1 + 0.2)", "0.30000000000000004");
    assert_output("print(round(2.675, 2))\nprint(round(2.5))", "2.67\n2");
    assert_output("x = 10\nx += 5\nx *= 2\nprint(x)", "30");
    assert_output("print(int(\"42\") + 1)\nprint(float(3))\nprint(abs(-2))", "43\n3.0\n2");
}

#[test]
fn repetition_and_in_place_repetition() {
    assert_output("xs = [0] * 3\nprint(xs)", "[0, 0, 0]");
    assert_output("xs = [1, 2]\nxs *= 2\nprint(xs)", "[1, 2, 1, 2]");
    assert_output("word = \"ab\"\nword *= 3\nprint(word)", "ababab");
    assert_output("xs = [7]\nxs *= -1\nprint(xs)", "[]");
    assert_output("x = [] * 1000000000000000000\nprint(len(x))", "0");
    assert_output("xs = []\nxs *= 9223372036854775807\nprint(xs)", "[]");
}

#[test]
fn oversized_repetition_is_a_runtime_error() {
    assert_output("print(\"start\")\nxs = [0] * 1000001\nprint(len(xs))", ERROR_MESSAGE);
    assert_output("xs = [1, 2]\nxs *= 600000\nprint(len(xs))", ERROR_MESSAGE);
    assert_output("xs = [0] * 1000000\nprint(len(xs))", "1000000");
}

#[test]
fn large_integers_behave_like_python() {
    assert_output("print(9007199254740993 / 1)", "9007199254740992.0");
    assert_output("print(round(1234, -2))\nprint(round(1250, -2))", "1200\n1200");

    let evaluation = evaluate("x = 99999999999999999999\nprint(1)").unwrap();
    assert_eq!(evaluation.output_text(), "1");
    assert_eq!(evaluation.skipped[0].reason.to_string(),
               "Error on line 1: Literal is too large.");
}

#[test]
fn loops_and_conditionals_are_skipped_with_their_bodies() {
    let src = "\
total = 0
for n in [1, 2, 3]:
    total += n
print(total)";
    assert_output(src, "0");

    let evaluation = evaluate(src).unwrap();
    assert_eq!(evaluation.skipped.len(), 2);
}

#[test]
fn class_shapes_are_recorded() {
    let src = "\
class Animal:
    def __init__(self, name):
        self.name = name
class Dog(Animal):
    def speak(self):
        return \"Woof\"
print(\"classes defined\")";
    let evaluation = evaluate(src).unwrap();

    assert_eq!(evaluation.output_text(), "classes defined");
    let dog = evaluation.class("Dog").unwrap();
    assert_eq!(dog.base.as_deref(), Some("Animal"));
    assert!(dog.method("speak").is_some());
    assert!(!dog.calls_super);
}

#[test]
fn touches_record_structure() {
    let src = "xs = [3, 1]\nxs.append(2)\nys = sorted(xs)\nxs[0] = 9";
    let evaluation = evaluate(src).unwrap();

    assert!(evaluation.touched("xs", Operation::Assign));
    assert!(evaluation.touched("xs", Operation::Method(pysnip::ast::ListMethod::Append)));
    assert!(evaluation.touched("xs", Operation::Call(pysnip::ast::Builtin::Sorted)));
    assert!(evaluation.touched("xs", Operation::IndexAssign));
    assert_eq!(evaluation.variable("xs").unwrap().to_string(), "[9, 1, 2]");
}

#[test]
fn lists_have_value_semantics() {
    assert_output("a = [1]\nb = a\na.append(2)\nprint(a)\nprint(b)", "[1, 2]\n[1]");
}

#[test]
fn grammar_restricts_recognized_patterns() {
    let basics = Grammar::only(&[Feature::Assign, Feature::ListLiteral, Feature::Print]);
    let src = "xs = [3, 1, 2]\nxs.sort()\nprint(xs)\nprint(len(xs))";

    assert_eq!(run_with(src, &basics), "[3, 1, 2]");
    assert_eq!(run_with(src, &basics.with(Feature::Sort).with(Feature::Len)),
               "[1, 2, 3]\n3");

    let evaluation = evaluate_with(src, &Grammar::only(&[Feature::Assign])).unwrap();
    assert_eq!(evaluation.variable("xs"), None);
    assert_eq!(evaluation.skipped.len(), 4);
}

#[test]
fn equality_treats_ints_and_floats_alike() {
    assert_output("xs = [1, 2.0, 2]\nprint(xs.count(2))", "2");
    assert_eq!(Value::Integer(1), Value::Real(1.0));
}
