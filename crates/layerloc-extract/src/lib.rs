use layerloc_core::{Layer, Page, StringCatalog, SymbolMaster, TextLayer};

/// Text layer reached directly through the page tree, with the name of its
/// container and its position among all of the container's children.
struct KeyedText<'a> {
    container: &'a str,
    index: usize,
    layer: &'a TextLayer,
}

/// Walks a page and collects its visible strings into a [`StringCatalog`].
///
/// Direct text layers are keyed `<container>-<index>` with a numeric suffix
/// on collision. Text reached through symbol instances is keyed by the id of
/// the text layer inside the master, so repeated instances collapse onto one
/// entry.
pub struct StringCatalogBuilder<'d> {
    symbols: &'d [SymbolMaster],
}

impl<'d> StringCatalogBuilder<'d> {
    pub fn new(symbols: &'d [SymbolMaster]) -> Self {
        Self { symbols }
    }

    /// Raw catalog for `page`, before value deduplication.
    pub fn build(&self, page: &Page) -> StringCatalog {
        let mut catalog = StringCatalog::new();

        let mut direct = Vec::new();
        collect_keyed(&page.name, &page.layers, &mut direct);
        for item in &direct {
            let key = generate_key(item.container, item.index, &catalog);
            catalog.insert(key, item.layer.text.clone());
        }

        let mut from_symbols = Vec::new();
        self.walk_symbols(&page.layers, false, &mut Vec::new(), &mut from_symbols);
        for layer in &from_symbols {
            catalog.insert(layer.id.clone(), layer.text.clone());
        }

        tracing::debug!(
            event = "catalog_built",
            page = %page.name,
            direct = direct.len(),
            symbol_texts = from_symbols.len(),
            keys = catalog.len()
        );
        catalog
    }

    /// Catalog ready for export: built, then deduplicated by value. Also
    /// returns how many keys the dedupe dropped.
    pub fn build_for_export(&self, page: &Page) -> (StringCatalog, usize) {
        let raw = self.build(page);
        let deduped = raw.dedup_by_value();
        let dropped = raw.len() - deduped.len();
        if dropped > 0 {
            tracing::debug!(
                event = "catalog_deduped",
                before = raw.len(),
                after = deduped.len()
            );
        }
        (deduped, dropped)
    }

    fn walk_symbols<'a>(
        &self,
        layers: &'a [Layer],
        in_master: bool,
        path: &mut Vec<&'a str>,
        out: &mut Vec<&'a TextLayer>,
    ) where
        'd: 'a,
    {
        for layer in layers {
            match layer {
                Layer::Text(t) if in_master => out.push(t),
                Layer::Text(_) => {}
                Layer::Group(g) => self.walk_symbols(&g.children, in_master, path, out),
                Layer::Symbol(inst) => {
                    let symbols: &'d [SymbolMaster] = self.symbols;
                    let Some(master) = SymbolMaster::find(symbols, &inst.master_id) else {
                        tracing::warn!(event = "symbol_master_missing", instance = %inst.id, master = %inst.master_id);
                        continue;
                    };
                    if path.contains(&master.id.as_str()) {
                        tracing::warn!(event = "symbol_cycle", instance = %inst.id, master = %master.id);
                        continue;
                    }
                    path.push(&master.id);
                    self.walk_symbols(&master.children, true, path, out);
                    path.pop();
                }
            }
        }
    }
}

fn collect_keyed<'a>(container: &'a str, layers: &'a [Layer], out: &mut Vec<KeyedText<'a>>) {
    for layer in layers {
        if let Layer::Group(g) = layer {
            collect_keyed(&g.name, &g.children, out);
        }
    }
    for (index, layer) in layers.iter().enumerate() {
        if let Layer::Text(t) = layer {
            out.push(KeyedText {
                container,
                index,
                layer: t,
            });
        }
    }
}

/// `<container>-<index>`, or the first `<container>-<index>-<n>` (n >= 1)
/// not yet present in `catalog`.
pub fn generate_key(container: &str, index: usize, catalog: &StringCatalog) -> String {
    let base = format!("{container}-{index}");
    if !catalog.contains_key(&base) {
        return base;
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{base}-{n}");
        if !catalog.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
