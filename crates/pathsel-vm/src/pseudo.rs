//! Pseudo-class evaluation.
//!
//! Positional pseudo-classes (`:nth`, `:first`, `:last`) look at the whole
//! candidate sequence. The rest test each candidate on its own, and the
//! selector-taking ones run their nested programs through the same VM.

use std::collections::{HashMap, HashSet};

use pathsel_core::{Host, NodeKind};
use pathsel_program::{NthExpr, Pseudo};

use crate::set_algebra::difference_with;
use crate::trace::Tracer;
use crate::vm::VM;

impl<H: Host + ?Sized, T: Tracer> VM<'_, H, T> {
    pub(crate) fn exec_pseudo(&mut self, pseudo: &Pseudo, set: Vec<H::Node>) -> Vec<H::Node> {
        let host = self.host;
        match pseudo {
            Pseudo::FirstChild => keep(set, |n| {
                host.is_element(n) && host.prev_element_sibling(n).is_none()
            }),
            Pseudo::LastChild => keep(set, |n| {
                host.is_element(n) && host.next_element_sibling(n).is_none()
            }),
            Pseudo::OnlyChild => keep(set, |n| {
                host.is_element(n)
                    && host.prev_element_sibling(n).is_none()
                    && host.next_element_sibling(n).is_none()
            }),
            Pseudo::NthChild(expr) => nth_child(host, set, expr),
            Pseudo::Empty => keep(set, |n| {
                !host
                    .children(n)
                    .any(|c| matches!(host.kind(c), NodeKind::Element | NodeKind::Text))
            }),
            Pseudo::Contains(text) => keep(set, |n| host.inner_markup(n).contains(&**text)),
            Pseudo::NodeValue(value) => keep(set, |n| {
                host.first_child(n)
                    .and_then(|c| host.node_value(c))
                    .is_some_and(|v| v == &**value)
            }),
            Pseudo::Checked => keep(set, |n| host.is_checked(n)),
            Pseudo::Not(program) => {
                let matching = self.run_nested(program, set.clone());
                difference_with(host, &matching, &set, self.strategy)
            }
            Pseudo::Nth(k) => set.get(k.wrapping_sub(1)).copied().into_iter().collect(),
            Pseudo::First => set.first().copied().into_iter().collect(),
            Pseudo::Last => set.last().copied().into_iter().collect(),
            Pseudo::Has(alternatives) => {
                let mut out = Vec::new();
                for node in set {
                    for program in alternatives {
                        if !self.run_nested(program, vec![node]).is_empty() {
                            out.push(node);
                            break;
                        }
                    }
                }
                out
            }
            Pseudo::Next(program) => {
                let mut out = Vec::new();
                for node in set {
                    if let Some(sibling) = host.next_element_sibling(node)
                        && !self.run_nested(program, vec![sibling]).is_empty()
                    {
                        out.push(node);
                    }
                }
                out
            }
            Pseudo::Prev(program) => {
                let mut out = Vec::new();
                for node in set {
                    if let Some(sibling) = host.prev_element_sibling(node)
                        && !self.run_nested(program, vec![sibling]).is_empty()
                    {
                        out.push(node);
                    }
                }
                out
            }
        }
    }
}

fn keep<N: Copy>(set: Vec<N>, pred: impl Fn(N) -> bool) -> Vec<N> {
    set.into_iter().filter(|&n| pred(n)).collect()
}

/// Element positions are indexed once per distinct parent, so a pass over
/// many siblings walks each sibling list a single time.
fn nth_child<H: Host + ?Sized>(host: &H, set: Vec<H::Node>, expr: &NthExpr) -> Vec<H::Node> {
    let mut positions: HashMap<H::Node, usize> = HashMap::new();
    let mut indexed: HashSet<H::Node> = HashSet::new();

    set.into_iter()
        .filter(|&n| {
            if !host.is_element(n) {
                return false;
            }
            let Some(parent) = host.parent(n) else {
                return false;
            };
            if indexed.insert(parent) {
                for (i, child) in host.element_children(parent).enumerate() {
                    positions.insert(child, i + 1);
                }
            }
            positions.get(&n).is_some_and(|&pos| expr.matches(pos))
        })
        .collect()
}
