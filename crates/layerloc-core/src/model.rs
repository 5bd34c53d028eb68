//! In-memory document tree: pages of layers plus shared symbol masters.
//!
//! Layers are a closed set of variants (`Text`, `Group`, `Symbol`) and every
//! traversal dispatches on them with `match`. Frames are relative to the
//! enclosing container.

use serde::{Deserialize, Serialize};

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_EM: f64 = 0.6;
const LINE_HEIGHT_EM: f64 = 1.2;

fn default_font_size() -> f64 {
    14.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Frame {
        Frame {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Smallest frame containing both.
    pub fn union(self, other: Frame) -> Frame {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Frame::new(x, y, right - x, bottom - y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub frame: Frame,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub frame: Frame,
    #[serde(default)]
    pub children: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInstance {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub frame: Frame,
    pub master_id: String,
}

/// Shared template content referenced by [`SymbolInstance::master_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMaster {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<Layer>,
}

impl SymbolMaster {
    /// Master with `id` among `masters`, if any.
    pub fn find<'a>(masters: &'a [SymbolMaster], id: &str) -> Option<&'a SymbolMaster> {
        masters.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Text(TextLayer),
    Group(GroupLayer),
    Symbol(SymbolInstance),
}

impl Layer {
    pub fn id(&self) -> &str {
        match self {
            Layer::Text(t) => &t.id,
            Layer::Group(g) => &g.id,
            Layer::Symbol(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Layer::Text(t) => &t.name,
            Layer::Group(g) => &g.name,
            Layer::Symbol(s) => &s.name,
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            Layer::Text(t) => t.frame,
            Layer::Group(g) => g.frame,
            Layer::Symbol(s) => s.frame,
        }
    }

    fn prefix_ids(&mut self, prefix: &str) {
        match self {
            Layer::Text(t) => t.id = format!("{prefix}/{}", t.id),
            Layer::Symbol(s) => s.id = format!("{prefix}/{}", s.id),
            Layer::Group(g) => {
                g.id = format!("{prefix}/{}", g.id);
                for child in g.children.iter_mut() {
                    child.prefix_ids(prefix);
                }
            }
        }
    }
}

/// Host-side text node the translation step writes into.
pub trait TextTarget {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
    /// Resize the node so its frame fits the current text.
    fn adjust_to_fit(&mut self);
}

impl TextTarget for TextLayer {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn adjust_to_fit(&mut self) {
        let lines = self.text.lines().count().max(1);
        let longest = self
            .text
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        self.frame.width = longest as f64 * self.font_size * GLYPH_WIDTH_EM;
        self.frame.height = lines as f64 * self.font_size * LINE_HEIGHT_EM;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Page {
    /// Text layers in translation order: group contents first, then the
    /// container's own text children. Symbol instances are skipped.
    pub fn text_layers(&self) -> Vec<&TextLayer> {
        let mut out = Vec::new();
        collect_text(&self.layers, &mut out);
        out
    }

    pub fn text_layers_mut(&mut self) -> Vec<&mut TextLayer> {
        let mut out = Vec::new();
        collect_text_mut(&mut self.layers, &mut out);
        out
    }

    /// Same order as [`Page::text_layers`], paired with page-absolute frames.
    pub fn positioned_text_layers(&self) -> Vec<(&TextLayer, Frame)> {
        let mut out = Vec::new();
        collect_positioned(&self.layers, 0.0, 0.0, &mut out);
        out
    }

    /// Union of the top-level layer frames.
    pub fn content_bounds(&self) -> Option<Frame> {
        self.layers.iter().map(Layer::frame).reduce(Frame::union)
    }
}

fn collect_text<'a>(layers: &'a [Layer], out: &mut Vec<&'a TextLayer>) {
    for layer in layers {
        if let Layer::Group(g) = layer {
            collect_text(&g.children, out);
        }
    }
    out.extend(layers.iter().filter_map(|l| match l {
        Layer::Text(t) => Some(t),
        _ => None,
    }));
}

fn collect_text_mut<'a>(layers: &'a mut [Layer], out: &mut Vec<&'a mut TextLayer>) {
    let mut texts = Vec::new();
    for layer in layers.iter_mut() {
        match layer {
            Layer::Group(g) => collect_text_mut(&mut g.children, out),
            Layer::Text(t) => texts.push(t),
            Layer::Symbol(_) => {}
        }
    }
    out.extend(texts);
}

fn collect_positioned<'a>(
    layers: &'a [Layer],
    dx: f64,
    dy: f64,
    out: &mut Vec<(&'a TextLayer, Frame)>,
) {
    for layer in layers {
        if let Layer::Group(g) = layer {
            collect_positioned(&g.children, dx + g.frame.x, dy + g.frame.y, out);
        }
    }
    for layer in layers {
        if let Layer::Text(t) = layer {
            out.push((t, t.frame.offset(dx, dy)));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub symbols: Vec<SymbolMaster>,
    #[serde(default)]
    pub current_page: usize,
}

impl Document {
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.current_page)
    }

    /// Deep-copy the current page as `<name><suffix>`, append it and make it
    /// current. Layer ids in the copy are re-prefixed with the new page id.
    pub fn duplicate_current_page(&mut self, suffix: &str) -> Option<&mut Page> {
        let source = self.current_page()?;
        let new_id = format!("{}-copy{}", source.id, self.pages.len());
        let mut copy = source.clone();
        copy.name = format!("{}{}", source.name, suffix);
        for layer in copy.layers.iter_mut() {
            layer.prefix_ids(&new_id);
        }
        copy.id = new_id;

        tracing::debug!(event = "page_duplicated", from = %source.id, to = %copy.id, name = %copy.name);
        self.pages.push(copy);
        self.current_page = self.pages.len() - 1;
        self.pages.last_mut()
    }

    /// Replace every symbol instance on the current page with a plain group
    /// holding a copy of its master's content. Returns the number of
    /// instances detached.
    pub fn detach_symbols(&mut self) -> usize {
        let Document {
            pages,
            symbols,
            current_page,
        } = self;
        let Some(page) = pages.get_mut(*current_page) else {
            return 0;
        };
        let mut path = Vec::new();
        detach_in(&mut page.layers, symbols, &mut path)
    }
}

fn detach_in(layers: &mut [Layer], symbols: &[SymbolMaster], path: &mut Vec<String>) -> usize {
    let mut detached = 0;
    for layer in layers.iter_mut() {
        let group = match layer {
            Layer::Text(_) => continue,
            Layer::Group(g) => {
                detached += detach_in(&mut g.children, symbols, path);
                continue;
            }
            Layer::Symbol(inst) => {
                let Some(master) = SymbolMaster::find(symbols, &inst.master_id) else {
                    tracing::warn!(event = "symbol_master_missing", instance = %inst.id, master = %inst.master_id);
                    continue;
                };
                if path.contains(&master.id) {
                    tracing::warn!(event = "symbol_cycle", instance = %inst.id, master = %master.id);
                    continue;
                }
                let mut children = master.children.clone();
                for child in children.iter_mut() {
                    child.prefix_ids(&inst.id);
                }
                path.push(master.id.clone());
                detached += detach_in(&mut children, symbols, path);
                path.pop();
                GroupLayer {
                    id: inst.id.clone(),
                    name: inst.name.clone(),
                    frame: inst.frame,
                    children,
                }
            }
        };
        *layer = Layer::Group(group);
        detached += 1;
    }
    detached
}
