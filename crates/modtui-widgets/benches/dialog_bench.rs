//! Benchmarks for dialog splicing and modal dispatch.
//!
//! Run with: cargo bench -p modtui-widgets --bench dialog_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use modtui_core::event::{Event, KeyCode};
use modtui_core::geometry::Rect;
use modtui_layout::Constraint;
use modtui_widgets::stack::{Stack, StackItem};
use modtui_widgets::text::Text;
use modtui_widgets::{ButtonSpec, Dialog, DialogId, DialogOptions, WidgetTree};

/// A root pile of `rows` labels with a dialog ready to open over it.
fn build(rows: usize) -> (WidgetTree, DialogId) {
    let mut tree = WidgetTree::new();
    let items: Vec<StackItem> = (0..rows)
        .map(|i| StackItem::new(tree.insert(Text::new(format!("row {i}"))), Constraint::Fixed(1)))
        .collect();
    let pile = tree.insert(Stack::pile(items));
    tree.set_child(tree.root(), Some(pile)).unwrap();
    let message = tree.insert(Text::new("Discard unsaved changes?"));
    let dialog = Dialog::build(
        &mut tree,
        message,
        DialogOptions::new().with_buttons(ButtonSpec::exit_cancel()),
    );
    (tree, dialog)
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialog/open_close");
    for rows in [10usize, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let (mut tree, dialog) = build(rows);
            b.iter(|| {
                dialog
                    .open_globally(&mut tree, black_box(Constraint::Percentage(60.0)))
                    .unwrap();
                dialog.close(&mut tree).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_modal_dispatch(c: &mut Criterion) {
    let (mut tree, dialog) = build(100);
    dialog.open_globally(&mut tree, Constraint::FitContent).unwrap();
    let root = tree.root();
    let area = Rect::new(0, 0, 120, 40);
    let tab = Event::key(KeyCode::Tab);

    c.bench_function("dialog/dispatch_tab", |b| {
        b.iter(|| black_box(tree.user_input(root, black_box(&tab), area, true)));
    });
}

fn bench_escape_round_trip(c: &mut Criterion) {
    let (mut tree, dialog) = build(100);
    let root = tree.root();
    let area = Rect::new(0, 0, 120, 40);
    let escape = Event::key(KeyCode::Escape);

    c.bench_function("dialog/open_escape", |b| {
        b.iter(|| {
            dialog.open_globally(&mut tree, Constraint::FitContent).unwrap();
            black_box(tree.user_input(root, &escape, area, true));
        });
    });
}

criterion_group!(
    benches,
    bench_open_close,
    bench_modal_dispatch,
    bench_escape_round_trip
);
criterion_main!(benches);
