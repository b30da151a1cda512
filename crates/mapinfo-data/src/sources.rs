//! Which descriptor lumps are parsed, and in what order.

/// A named descriptor text, typically one WAD lump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    pub name: String,
    pub data: String,
}

impl Lump {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Order lumps for parsing: the built-in base lump first, then every
/// `ZMAPINFO` lump in load order. `MAPINFO` lumps are only used when no
/// `ZMAPINFO` lump is present. Lumps with any other name are dropped.
pub fn load_order(base: Lump, lumps: Vec<Lump>) -> Vec<Lump> {
    let has_zmapinfo = lumps.iter().any(|l| l.is_named("ZMAPINFO"));
    let wanted = if has_zmapinfo { "ZMAPINFO" } else { "MAPINFO" };

    let dropped = lumps.iter().filter(|l| !l.is_named(wanted)).count();
    if dropped > 0 {
        log::debug!("ignoring {dropped} lump(s) not named {wanted}");
    }

    std::iter::once(base)
        .chain(lumps.into_iter().filter(|l| l.is_named(wanted)))
        .collect()
}
