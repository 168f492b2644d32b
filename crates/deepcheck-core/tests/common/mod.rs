use deepcheck_core::buffer::{strip_ansi, DiagnosticBuffer};
use deepcheck_core::config::RenderConfig;
use deepcheck_core::shape::{FloatKind, Shape};
use deepcheck_core::strategy::Predicate;
use deepcheck_core::value::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Defaults without ANSI styling
#[allow(dead_code)]
pub fn plain() -> RenderConfig {
    RenderConfig::plain()
}

#[allow(dead_code)]
pub fn plain_buffer() -> DiagnosticBuffer {
    DiagnosticBuffer::new(RenderConfig::plain())
}

/// Undo visualizer decoration: styling, gutters, row breaks from wrapping
/// and the visible-space glyph. Row-ending glyphs are left in place.
#[allow(dead_code)]
pub fn strip_decorations(rendered: &str) -> String {
    strip_ansi(rendered)
        .lines()
        .map(|row| match row.find(" │ ") {
            Some(at) => &row[at + " │ ".len()..],
            None => row,
        })
        .collect::<String>()
        .replace('·', " ")
}

/// `{a: bool, b: i32}`
#[allow(dead_code)]
pub fn flags_shape() -> Shape {
    Shape::record("Flags", [("a", Shape::Bool), ("b", Shape::int(32, true))])
}

#[allow(dead_code)]
pub fn flags(a: bool, b: i32) -> Value<'static> {
    Value::Record(vec![Value::Bool(a), Value::Int(i128::from(b))])
}

/// `union Reading { Celsius(f64), Label(bytes), Missing }`
#[allow(dead_code)]
pub fn reading_shape() -> Shape {
    Shape::union(
        "Reading",
        [
            ("Celsius", Shape::Float(FloatKind::F64)),
            ("Label", Shape::Bytes),
            ("Missing", Shape::Void),
        ],
    )
}

/// Value-equal predicate that counts its calls
#[allow(dead_code)]
pub fn counting_equal(name: &'static str) -> (Predicate, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let predicate = Predicate::new(name, move |e, a| {
        seen.fetch_add(1, Ordering::SeqCst);
        e == a
    });
    (predicate, calls)
}

#[allow(dead_code)]
pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
