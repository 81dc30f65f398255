use pathsel_core::{Colors, Host};
use pathsel_program::Mode;

use crate::test_utils::{list, program};
use crate::{PrintTracer, VM, Verbosity};

fn trace_select(text: &str, verbosity: Verbosity) -> String {
    let (doc, _, _) = list();
    let p = program(text, Mode::Select);
    let mut vm = VM::builder(&doc)
        .tracer(PrintTracer::new(verbosity, Colors::OFF))
        .build();
    vm.select(&p, doc.document());
    vm.into_tracer().lines().join("\n")
}

fn trace_filter(text: &str, verbosity: Verbosity) -> String {
    let (doc, _, items) = list();
    let p = program(text, Mode::Filter);
    let mut vm = VM::builder(&doc)
        .tracer(PrintTracer::new(verbosity, Colors::OFF))
        .build();
    vm.filter(&p, &items[..2]);
    vm.into_tracer().lines().join("\n")
}

#[test]
fn default_hides_nested_programs() {
    insta::assert_snapshot!(trace_select("ul > li:not(.a)", Verbosity::Default), @r"
    select `ul > li:not(.a)` on 1
      0 collect   descendant ul          1 -> 1
      1 collect   child li               1 -> 5
      2 pseudo    :not                   5 -> 3
      dedup 3 -> 3
    ");
}

#[test]
fn verbose_shows_nested_programs() {
    insta::assert_snapshot!(trace_select("ul > li:not(.a)", Verbosity::Verbose), @r"
    select `ul > li:not(.a)` on 1
      0 collect   descendant ul          1 -> 1
      1 collect   child li               1 -> 5
      2 pseudo    :not                   5 -> 3
        filter `.a` on 5
          0 class     .a                     5 -> 2
          dedup 2 -> 2
      dedup 3 -> 3
    ");
}

#[test]
fn very_verbose_lists_nodes() {
    insta::assert_snapshot!(trace_filter("li:first", Verbosity::VeryVerbose), @r"
    filter `li:first` on 2
      0 tag       li                     2 -> 2
          [NodeId(3), NodeId(5)]
      1 pseudo    :first                 2 -> 1
          [NodeId(3)]
      dedup 1 -> 1
    ");
}

#[test]
fn empty_step_ends_the_trace() {
    insta::assert_snapshot!(trace_select("ol > li", Verbosity::Default), @r"
    select `ol > li` on 1
      0 collect   descendant ol          1 -> 0
      dedup 0 -> 0
    ");
}

#[test]
fn colored_zero_counts() {
    let (doc, _, _) = list();
    let p = program("ol", Mode::Select);
    let mut vm = VM::builder(&doc)
        .tracer(PrintTracer::new(Verbosity::Default, Colors::ON))
        .build();
    vm.select(&p, doc.document());
    let dedup = vm.tracer().lines().last().cloned().unwrap_or_default();
    assert!(dedup.ends_with(&format!("{}0{}", Colors::ON.red, Colors::ON.reset)));
}
