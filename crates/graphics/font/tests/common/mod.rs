//! Assembles small TrueType files in memory

#![allow(dead_code)]

/// A point of a simple glyph: `(x, y, on_curve)`
pub type Point = (i16, i16, bool);

pub struct FontBuilder {
    glyphs: Vec<Vec<u8>>,
    long_metrics: Vec<(u16, i16)>,
    left_side_bearings: Vec<i16>,
    cmap_segments: Vec<(u16, u16, i16)>,
    cmap_subtable: Option<Vec<u8>>,
    max_component_depth: u16,
    name: Option<String>,
    omitted_tables: Vec<[u8; 4]>,
    long_loca: bool,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    pub fn new() -> Self {
        Self {
            glyphs: vec![],
            long_metrics: vec![],
            left_side_bearings: vec![],
            cmap_segments: vec![],
            cmap_subtable: None,
            max_component_depth: 1,
            name: None,
            omitted_tables: vec![],
            long_loca: false,
        }
    }

    /// Add a glyph, its id is the number of glyphs added before it
    pub fn glyph(mut self, data: Vec<u8>) -> Self {
        self.glyphs.push(data);
        self
    }

    pub fn long_metric(mut self, advance_width: u16, left_side_bearing: i16) -> Self {
        self.long_metrics.push((advance_width, left_side_bearing));
        self
    }

    /// Left side bearing of a glyph past the last long metric
    pub fn left_side_bearing(mut self, left_side_bearing: i16) -> Self {
        self.left_side_bearings.push(left_side_bearing);
        self
    }

    /// Map the codepoint range `start..end` to `codepoint + delta`
    pub fn map_range(mut self, start: u16, end: u16, delta: i16) -> Self {
        self.cmap_segments.push((start, end, delta));
        self
    }

    /// Replace the generated format 4 cmap subtable
    pub fn cmap_subtable(mut self, subtable: Vec<u8>) -> Self {
        self.cmap_subtable = Some(subtable);
        self
    }

    pub fn max_component_depth(mut self, depth: u16) -> Self {
        self.max_component_depth = depth;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn without_table(mut self, tag: &[u8; 4]) -> Self {
        self.omitted_tables.push(*tag);
        self
    }

    pub fn long_loca(mut self) -> Self {
        self.long_loca = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let (loca, glyf) = self.loca_and_glyf();

        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", self.cmap()),
            (*b"glyf", glyf),
            (*b"head", self.head()),
            (*b"hhea", self.hhea()),
            (*b"hmtx", self.hmtx()),
            (*b"loca", loca),
            (*b"maxp", self.maxp()),
        ];
        if let Some(name) = &self.name {
            tables.push((*b"name", name_table(name)));
        }
        tables.retain(|(tag, _)| !self.omitted_tables.contains(tag));
        tables.sort_by_key(|(tag, _)| *tag);

        let num_tables = tables.len() as u16;
        let mut font = vec![];
        font.extend(0x00010000_u32.to_be_bytes());
        font.extend(num_tables.to_be_bytes());
        font.extend([0; 6]);

        let mut offset = 12 + 16 * tables.len();
        for (tag, data) in &tables {
            font.extend(tag);
            font.extend(checksum(data).to_be_bytes());
            font.extend((offset as u32).to_be_bytes());
            font.extend((data.len() as u32).to_be_bytes());
            offset += padded_len(data.len());
        }

        for (_, data) in &tables {
            font.extend(data);
            font.resize(font.len() + padded_len(data.len()) - data.len(), 0);
        }

        font
    }

    fn loca_and_glyf(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = vec![];
        let mut offsets = vec![0];
        for glyph in &self.glyphs {
            glyf.extend(glyph);
            glyf.resize(glyf.len() + padded_len(glyph.len()) - glyph.len(), 0);
            offsets.push(glyf.len() as u32);
        }

        let loca = offsets
            .iter()
            .flat_map(|&offset| {
                if self.long_loca {
                    offset.to_be_bytes().to_vec()
                } else {
                    ((offset / 2) as u16).to_be_bytes().to_vec()
                }
            })
            .collect();

        (loca, glyf)
    }

    fn head(&self) -> Vec<u8> {
        let mut head = vec![];
        head.extend(1_u16.to_be_bytes());
        head.extend(0_u16.to_be_bytes());
        head.extend(0x00010000_u32.to_be_bytes());
        head.extend(0_u32.to_be_bytes());
        head.extend(0x5F0F3CF5_u32.to_be_bytes());
        head.extend(0_u16.to_be_bytes());
        head.extend(1000_u16.to_be_bytes());
        head.extend(0_i64.to_be_bytes());
        head.extend(0_i64.to_be_bytes());
        head.extend([0; 8]);
        head.extend(0_u16.to_be_bytes());
        head.extend(8_u16.to_be_bytes());
        head.extend(2_i16.to_be_bytes());
        head.extend(i16::from(self.long_loca).to_be_bytes());
        head.extend(0_i16.to_be_bytes());
        head
    }

    fn maxp(&self) -> Vec<u8> {
        let mut maxp = vec![];
        maxp.extend(0x00010000_u32.to_be_bytes());
        maxp.extend((self.glyphs.len() as u16).to_be_bytes());
        maxp.extend([0; 24]);
        maxp.extend(self.max_component_depth.to_be_bytes());
        maxp
    }

    fn hhea(&self) -> Vec<u8> {
        let mut hhea = vec![];
        hhea.extend(0x00010000_u32.to_be_bytes());
        hhea.extend(800_i16.to_be_bytes());
        hhea.extend((-200_i16).to_be_bytes());
        hhea.extend(0_i16.to_be_bytes());
        hhea.extend([0; 14]);
        hhea.extend([0; 8]);
        hhea.extend(0_i16.to_be_bytes());
        hhea.extend((self.long_metrics.len() as u16).to_be_bytes());
        hhea
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut hmtx = vec![];
        for (advance_width, left_side_bearing) in &self.long_metrics {
            hmtx.extend(advance_width.to_be_bytes());
            hmtx.extend(left_side_bearing.to_be_bytes());
        }
        for left_side_bearing in &self.left_side_bearings {
            hmtx.extend(left_side_bearing.to_be_bytes());
        }
        hmtx
    }

    fn cmap(&self) -> Vec<u8> {
        let subtable = self
            .cmap_subtable
            .clone()
            .unwrap_or_else(|| format4(&self.cmap_segments));

        let mut cmap = vec![];
        cmap.extend(0_u16.to_be_bytes());
        cmap.extend(1_u16.to_be_bytes());
        cmap.extend(3_u16.to_be_bytes());
        cmap.extend(1_u16.to_be_bytes());
        cmap.extend(12_u32.to_be_bytes());
        cmap.extend(subtable);
        cmap
    }
}

fn format4(segments: &[(u16, u16, i16)]) -> Vec<u8> {
    let mut segments = segments.to_vec();
    segments.sort_by_key(|(start, ..)| *start);
    segments.push((0xFFFF, 0xFFFF, 1));

    let segment_count = segments.len() as u16;
    let length = 16 + 8 * segment_count;

    let mut subtable = vec![];
    for value in [4, length, 0, segment_count * 2, 0, 0, 0] {
        subtable.extend(value.to_be_bytes());
    }
    for (_, end, _) in &segments {
        subtable.extend(end.to_be_bytes());
    }
    subtable.extend(0_u16.to_be_bytes());
    for (start, ..) in &segments {
        subtable.extend(start.to_be_bytes());
    }
    for (.., delta) in &segments {
        subtable.extend(delta.to_be_bytes());
    }
    for _ in &segments {
        subtable.extend(0_u16.to_be_bytes());
    }
    subtable
}

/// A format 6 subtable, which is not supported for lookups
pub fn trimmed_table_mapping() -> Vec<u8> {
    let mut subtable = vec![];
    for value in [6_u16, 10, 0, 0, 0] {
        subtable.extend(value.to_be_bytes());
    }
    subtable
}

fn name_table(name: &str) -> Vec<u8> {
    let value: Vec<u8> = name.encode_utf16().flat_map(u16::to_be_bytes).collect();

    let mut table = vec![];
    // Windows, Unicode BMP, en-US, full name
    for field in [0, 1, 18, 3, 1, 0x409, 4, value.len() as u16, 0] {
        table.extend(field.to_be_bytes());
    }
    table.extend(value);
    table
}

/// Encode a simple glyph, every coordinate is stored as a 16 bit delta
pub fn simple_glyph(contours: &[&[Point]]) -> Vec<u8> {
    let points: Vec<Point> = contours.iter().flat_map(|c| c.iter().copied()).collect();

    let mut glyph = vec![];
    glyph.extend((contours.len() as i16).to_be_bytes());
    let min_x = points.iter().map(|p| p.0).min().unwrap_or_default();
    let min_y = points.iter().map(|p| p.1).min().unwrap_or_default();
    let max_x = points.iter().map(|p| p.0).max().unwrap_or_default();
    let max_y = points.iter().map(|p| p.1).max().unwrap_or_default();
    for value in [min_x, min_y, max_x, max_y] {
        glyph.extend(value.to_be_bytes());
    }

    let mut end_point = 0_u16;
    for contour in contours {
        end_point += contour.len() as u16;
        glyph.extend((end_point - 1).to_be_bytes());
    }

    // No instructions
    glyph.extend(0_u16.to_be_bytes());

    for (_, _, on_curve) in &points {
        glyph.push(u8::from(*on_curve));
    }

    let mut previous = 0;
    for (x, ..) in &points {
        glyph.extend((x - previous).to_be_bytes());
        previous = *x;
    }
    let mut previous = 0;
    for (_, y, _) in &points {
        glyph.extend((y - previous).to_be_bytes());
        previous = *y;
    }

    glyph
}

/// Encode a compound glyph whose components are placed at `(glyph, x, y)`
pub fn compound_glyph(components: &[(u16, i16, i16)]) -> Vec<u8> {
    const ARG_1_AND_2_ARE_WORDS: u16 = 1 << 0;
    const ARGS_ARE_XY_VALUES: u16 = 1 << 1;
    const MORE_COMPONENTS: u16 = 1 << 5;

    let mut glyph = vec![];
    glyph.extend((-1_i16).to_be_bytes());
    glyph.extend([0; 8]);

    for (index, (glyph_id, x, y)) in components.iter().enumerate() {
        let mut flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if index + 1 != components.len() {
            flags |= MORE_COMPONENTS;
        }
        glyph.extend(flags.to_be_bytes());
        glyph.extend(glyph_id.to_be_bytes());
        glyph.extend(x.to_be_bytes());
        glyph.extend(y.to_be_bytes());
    }

    glyph
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0_u32, |sum, chunk| {
        let mut word = [0; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}
