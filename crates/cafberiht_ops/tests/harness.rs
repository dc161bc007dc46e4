use cafberiht::{cafberiht, Cafberiht};
use cafberiht_ops::{accumulate, layout, mixin::CoreInterface, ops::CoreType, CoreCafberiht, CAFBERIHT_WIDTH};

use std::process::{Command, Output};

const EXAMPLE: &str = env!("CARGO_BIN_EXE_cafberiht_example");
const LAYOUT: &str = env!("CARGO_BIN_EXE_cafberiht-layout");

cafberiht! {
    struct Ten: CoreInterface<CoreType> = first(10);
    struct Single: CoreInterface<CoreType> = first(1);
}

fn run(program: &str, args: &[&str]) -> Output {
    Command::new(program)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {}: {}", program, e))
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn example_prints_one_line() {
    let output = run(EXAMPLE, &[]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let text = stdout(&output);
    let line = text.strip_suffix('\n').unwrap();
    assert!(!line.contains('\n'));

    let rest = line.strip_prefix("Final Value: ").unwrap();
    let (value, width) = rest.split_once(", For Cafberiht Width of: ").unwrap();
    assert!(value.parse::<u64>().is_ok());
    assert_eq!(width, CAFBERIHT_WIDTH.to_string());
}

#[test]
fn one_addition_per_even_operation() {
    assert_eq!(accumulate(&mut Ten::default()).additions(), 5);
    assert_eq!(accumulate(&mut Single::default()).additions(), 1);
    assert_eq!(
        accumulate(&mut CoreCafberiht::default()).additions(),
        (CAFBERIHT_WIDTH + 1) / 2
    );
}

fn admitted_positions<C>(container: &C) -> Vec<usize>
where
    C: Cafberiht + cafberiht::InspectAll<layout::LayoutCollector, Vec<layout::LayoutRow>>,
{
    layout::collect(container)
        .into_iter()
        .filter(|row| row.admitted)
        .map(|row| row.position)
        .collect()
}

#[test]
fn additions_run_on_even_positions() {
    assert_eq!(admitted_positions(&Ten::default()), [0, 2, 4, 6, 8]);
    assert_eq!(admitted_positions(&Single::default()), [0]);
}

#[test]
fn layout_lists_every_operation() {
    let output = run(LAYOUT, &["--format", "csv", "--ticks", "2"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("position,value,name,admitted,kernel_iteration_count")
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), CoreCafberiht::SIZE);
    assert_eq!(rows[0], "0,0,attn_q,true,2");
}

#[test]
fn layout_filters_admitted_operations() {
    let output = run(LAYOUT, &["--format", "csv", "--admitted-only"]);
    assert!(output.status.success());

    let rows = stdout(&output).lines().skip(1).count() as u64;
    assert_eq!(rows, (CAFBERIHT_WIDTH + 1) / 2);
}

#[test]
fn layout_locates_operations() {
    let output = run(LAYOUT, &["--enumerator", "attn_q"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n");

    let output = run(LAYOUT, &["--enumerator", "sample_tokens"]);
    assert!(output.status.success());
    let expected = match <CoreCafberiht as Cafberiht>::position(CoreType::SampleTokens) {
        Some(position) => format!("{}\n", position),
        None => "absent\n".to_string(),
    };
    assert_eq!(stdout(&output), expected);
}

#[test]
fn layout_rejects_unknown_operations() {
    let output = run(LAYOUT, &["--enumerator", "attn_z"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to look up `attn_z`"));
    assert!(stderr.contains("unknown enumerator `attn_z`"));
}
