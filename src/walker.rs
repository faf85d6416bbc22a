//! Field flattening for decoded records.
//!
//! Every record type implements [`Walk`], visiting its fields in wire order
//! through a [`Walker`]. The walker turns each leaf into a `(key, value)` pair
//! using one of two key schemes:
//!
//! - [`KeyScheme::Path`] builds slash-delimited paths prefixed by the packet
//!   kind name (`CarStatus/CarStatusData[3]/FuelInTank`), used by the
//!   WebSocket sink
//! - [`KeyScheme::Mnemonic`] yields the bare field name, suffixed with a wheel
//!   tag for four-element arrays (`TyresPressureFL`) or a numeric index for
//!   other arrays, matched against the OSC address table
//!
//! ```rust
//! use f1_telem_bridge::walker::{KeyScheme, Walk, Walker, collect};
//!
//! struct Wheels {
//!     pressure: [f32; 4],
//! }
//!
//! impl Walk for Wheels {
//!     fn walk(&self, w: &mut Walker<'_>) {
//!         w.scalars("TyresPressure", &self.pressure);
//!     }
//! }
//!
//! let wheels = Wheels { pressure: [21.0, 21.5, 22.0, 22.5] };
//! let fields = collect(&wheels, KeyScheme::Mnemonic);
//! assert_eq!(fields[2].0, "TyresPressureFL");
//!
//! let fields = collect(&wheels, KeyScheme::Path("CarTelemetry"));
//! assert_eq!(fields[2].0, "CarTelemetry/TyresPressure[2]");
//! ```

use crate::Value;

/// Suffixes for four-element arrays in index order.
pub const WHEEL_SUFFIXES: [&str; 4] = ["RL", "RR", "FL", "FR"];

/// How leaf keys are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme<'p> {
    /// Hierarchical path rooted at the given prefix.
    Path(&'p str),
    /// Bare mnemonic names.
    Mnemonic,
}

/// A record whose leaf fields can be visited in declaration order.
pub trait Walk {
    fn walk(&self, w: &mut Walker<'_>);
}

/// Visitor state handed to [`Walk::walk`].
pub struct Walker<'a> {
    mnemonic: bool,
    path: String,
    emit: &'a mut dyn FnMut(String, Value),
}

impl<'a> Walker<'a> {
    pub fn new(scheme: KeyScheme<'_>, emit: &'a mut dyn FnMut(String, Value)) -> Self {
        match scheme {
            KeyScheme::Path(prefix) => Self { mnemonic: false, path: prefix.to_string(), emit },
            KeyScheme::Mnemonic => Self { mnemonic: true, path: String::new(), emit },
        }
    }

    fn leaf_key(&self, name: &str) -> String {
        if self.mnemonic { name.to_string() } else { format!("{}/{}", self.path, name) }
    }

    /// One scalar field.
    pub fn scalar(&mut self, name: &str, value: impl Into<Value>) {
        let key = self.leaf_key(name);
        (self.emit)(key, value.into());
    }

    /// A fixed-length name or code, emitted as text up to the first NUL.
    pub fn text(&mut self, name: &str, bytes: &[u8]) {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = String::from_utf8_lossy(&bytes[..end]).into_owned();
        self.scalar(name, Value::Text(text));
    }

    /// A nested record.
    pub fn record<T: Walk>(&mut self, name: &str, record: &T) {
        if self.mnemonic {
            record.walk(self);
            return;
        }
        let restore = self.path.len();
        self.path.push('/');
        self.path.push_str(name);
        record.walk(self);
        self.path.truncate(restore);
    }

    /// A fixed array of scalars.
    pub fn scalars<T: Into<Value> + Copy>(&mut self, name: &str, items: &[T]) {
        let wheels = items.len() == WHEEL_SUFFIXES.len();
        for (i, item) in items.iter().enumerate() {
            let key = match (self.mnemonic, wheels) {
                (true, true) => format!("{}{}", name, WHEEL_SUFFIXES[i]),
                (true, false) => format!("{name}{i}"),
                (false, _) => format!("{}/{}[{}]", self.path, name, i),
            };
            (self.emit)(key, (*item).into());
        }
    }

    /// A fixed array of records.
    pub fn records<T: Walk>(&mut self, name: &str, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            if self.mnemonic {
                item.walk(self);
                continue;
            }
            let restore = self.path.len();
            self.path.push_str(&format!("/{name}[{i}]"));
            item.walk(self);
            self.path.truncate(restore);
        }
    }

    /// A two-dimensional scalar array (`rows` outer, columns inner).
    ///
    /// Path keys read `Name[row][col]`; mnemonic keys read `Name{row}_{col}`.
    pub fn grid<T: Into<Value> + Copy, const N: usize>(&mut self, name: &str, rows: &[[T; N]]) {
        for (r, row) in rows.iter().enumerate() {
            for (c, item) in row.iter().enumerate() {
                let key = if self.mnemonic {
                    format!("{name}{r}_{c}")
                } else {
                    format!("{}/{}[{}][{}]", self.path, name, r, c)
                };
                (self.emit)(key, (*item).into());
            }
        }
    }
}

/// Flatten `record` into `(key, value)` pairs under `scheme`.
pub fn collect<T: Walk + ?Sized>(record: &T, scheme: KeyScheme<'_>) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    let mut push = |key: String, value: Value| fields.push((key, value));
    let mut walker = Walker::new(scheme, &mut push);
    record.walk(&mut walker);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Clone, Copy)]
    struct Inner {
        a: u8,
        b: [u16; 3],
    }

    impl Walk for Inner {
        fn walk(&self, w: &mut Walker<'_>) {
            w.scalar("A", self.a);
            w.scalars("B", &self.b);
        }
    }

    struct Outer {
        name: [u8; 8],
        inner: Inner,
        cars: [Inner; 2],
        grid: [[u8; 2]; 2],
    }

    impl Walk for Outer {
        fn walk(&self, w: &mut Walker<'_>) {
            w.text("Name", &self.name);
            w.record("Inner", &self.inner);
            w.records("Cars", &self.cars);
            w.grid("Grid", &self.grid);
        }
    }

    fn sample() -> Outer {
        Outer {
            name: *b"HAM\0\0\0\0\0",
            inner: Inner { a: 1, b: [2, 3, 4] },
            cars: [Inner { a: 5, b: [6, 7, 8] }, Inner { a: 9, b: [10, 11, 12] }],
            grid: [[1, 2], [3, 4]],
        }
    }

    fn keys(fields: &[(String, Value)]) -> Vec<&str> {
        fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn path_scheme_builds_hierarchical_keys_in_declaration_order() {
        let fields = collect(&sample(), KeyScheme::Path("Test"));
        assert_eq!(
            keys(&fields),
            vec![
                "Test/Name",
                "Test/Inner/A",
                "Test/Inner/B[0]",
                "Test/Inner/B[1]",
                "Test/Inner/B[2]",
                "Test/Cars[0]/A",
                "Test/Cars[0]/B[0]",
                "Test/Cars[0]/B[1]",
                "Test/Cars[0]/B[2]",
                "Test/Cars[1]/A",
                "Test/Cars[1]/B[0]",
                "Test/Cars[1]/B[1]",
                "Test/Cars[1]/B[2]",
                "Test/Grid[0][0]",
                "Test/Grid[0][1]",
                "Test/Grid[1][0]",
                "Test/Grid[1][1]",
            ]
        );
        assert_eq!(fields[0].1, Value::Text("HAM".into()));
        assert_eq!(fields[10].1, Value::UInt16(10));
    }

    #[test]
    fn mnemonic_scheme_uses_bare_names() {
        let fields = collect(&sample(), KeyScheme::Mnemonic);
        assert_eq!(&keys(&fields)[..5], &["Name", "A", "B0", "B1", "B2"]);
        assert_eq!(keys(&fields).last().copied(), Some("Grid1_1"));
    }

    #[test]
    fn four_element_arrays_get_wheel_suffixes_only_in_mnemonic_scheme() {
        struct Wheels([u8; 4]);
        impl Walk for Wheels {
            fn walk(&self, w: &mut Walker<'_>) {
                w.scalars("SurfaceType", &self.0);
            }
        }

        let wheels = Wheels([1, 2, 3, 4]);
        let mnemonic = collect(&wheels, KeyScheme::Mnemonic);
        assert_eq!(
            keys(&mnemonic),
            vec!["SurfaceTypeRL", "SurfaceTypeRR", "SurfaceTypeFL", "SurfaceTypeFR"]
        );

        let path = collect(&wheels, KeyScheme::Path("CarTelemetry"));
        assert_eq!(path[3].0, "CarTelemetry/SurfaceType[3]");
    }
}
