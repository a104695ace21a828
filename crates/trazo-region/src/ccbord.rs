//! Border following with topological hierarchy
//!
//! Implements Suzuki and Abe's border following ("Topological Structural
//! Analysis of Digitized Binary Images by Border Following", 1985) over
//! 8-connected foreground. The image is surrounded by a virtual one-pixel
//! background frame, so shapes touching the edge still have closed
//! borders.
//!
//! Every border gets a sequential label (NBD) starting at 2; the frame is
//! label 1. Traced pixels are marked `NBD` or `-NBD` in a label grid, and
//! the last label met in the current row (LNBD) decides the parent of the
//! next border found:
//!
//! | new border | LNBD border | parent               |
//! |------------|-------------|----------------------|
//! | outer      | outer       | parent of LNBD border |
//! | outer      | hole        | LNBD border           |
//! | hole       | outer       | LNBD border           |
//! | hole       | hole        | parent of LNBD border |
//!
//! The frame behaves as a hole border with no parent.

use crate::error::RegionResult;
use trazo_core::{Box, Pix, Pta};

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return None;
        }
        let idx = DIRTAB[(1 + dy) as usize][(1 + dx) as usize];
        Some(Self::from_index(idx))
    }

    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::West,
            1 => Direction::NorthWest,
            2 => Direction::North,
            3 => Direction::NorthEast,
            4 => Direction::East,
            5 => Direction::SouthEast,
            6 => Direction::South,
            _ => Direction::SouthWest,
        }
    }

    /// Next direction clockwise
    #[inline]
    pub fn cw(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    /// Next direction counterclockwise
    #[inline]
    pub fn ccw(self) -> Self {
        Self::from_index(self as usize + 7)
    }

    /// The opposite direction
    #[inline]
    pub fn reverse(self) -> Self {
        Self::from_index(self as usize + 4)
    }
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Direction lookup table: DIRTAB[1+dy][1+dx] gives direction index
/// (the center entry is never read).
const DIRTAB: [[usize; 3]; 3] = [[1, 2, 3], [0, 8, 4], [7, 6, 5]];

/// Border type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    /// Boundary between a component and the background around it
    #[default]
    Outer,
    /// Boundary between a component and a hole inside it
    Hole,
}

/// Which borders to report and how to link them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// Only top-level outer borders, no parents
    External,
    /// Two levels: outer borders at the top, each hole parented to the
    /// outer border of its component. A component inside a hole is a new
    /// top-level outer border.
    #[default]
    CComp,
    /// Every border, no parents
    List,
    /// Every border with its full nesting
    Tree,
}

/// How many border pixels to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainApprox {
    /// Every border pixel
    None,
    /// Only the pixels where the chain direction changes, so straight
    /// horizontal, vertical and diagonal runs keep just their end points
    #[default]
    Simple,
}

/// A single closed border
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Border {
    /// Type of this border
    pub border_type: BorderType,
    /// Index of the enclosing border in the same [`ImageBorders`]
    pub parent: Option<usize>,
    /// Border pixels in traversal order, image coordinates
    pub points: Pta,
}

impl Border {
    /// Get the number of points in this border
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the border is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area enclosed by the border polygon
    pub fn area(&self) -> f64 {
        self.points.polygon_area()
    }

    /// Get bounding box of this border
    pub fn bounding_box(&self) -> Option<Box> {
        self.points.bounding_box()
    }
}

/// Collection of all borders in an image
#[derive(Debug, Clone, Default)]
pub struct ImageBorders {
    /// Width of the source image
    pub width: u32,
    /// Height of the source image
    pub height: u32,
    /// Borders in the order their start pixels are met in a raster scan
    pub borders: Vec<Border>,
}

impl ImageBorders {
    /// Get the number of borders
    pub fn len(&self) -> usize {
        self.borders.len()
    }

    /// Check if no border was found
    pub fn is_empty(&self) -> bool {
        self.borders.is_empty()
    }

    /// Iterate over the borders
    pub fn iter(&self) -> std::slice::Iter<'_, Border> {
        self.borders.iter()
    }

    /// Borders that have no parent
    pub fn top_level(&self) -> impl Iterator<Item = &Border> {
        self.borders.iter().filter(|b| b.parent.is_none())
    }

    /// Indices of the borders whose parent is `index`
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.borders
            .iter()
            .enumerate()
            .filter_map(move |(i, b)| (b.parent == Some(index)).then_some(i))
    }

    /// Number of borders of the given type
    pub fn count_of(&self, border_type: BorderType) -> usize {
        self.borders
            .iter()
            .filter(|b| b.border_type == border_type)
            .count()
    }
}

/// Label grid with a one-pixel zero frame around the image.
struct LabelGrid {
    stride: usize,
    cells: Vec<i32>,
}

impl LabelGrid {
    fn from_pix(pix: &Pix) -> Self {
        let stride = pix.width() as usize + 2;
        let rows = pix.height() as usize + 2;
        let mut cells = vec![0i32; stride * rows];
        for (x, y) in pix.on_pixels() {
            cells[(y as usize + 1) * stride + x as usize + 1] = 1;
        }
        Self { stride, cells }
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> i32 {
        self.cells[y as usize * self.stride + x as usize]
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, v: i32) {
        self.cells[y as usize * self.stride + x as usize] = v;
    }
}

/// Find the borders of all foreground regions.
///
/// Accepts 1-bpp or 8-bpp input; any nonzero pixel is foreground. The
/// caller's image is not modified.
///
/// # Examples
///
/// ```
/// use trazo_core::{Pix, PixelDepth};
/// use trazo_region::{ChainApprox, RetrievalMode, find_contours};
///
/// let mut pm = Pix::new(8, 8, PixelDepth::Bit1).unwrap().to_mut();
/// for y in 2..6 {
///     for x in 2..6 {
///         pm.set_pixel(x, y, 1).unwrap();
///     }
/// }
/// let borders = find_contours(&pm.into(), RetrievalMode::External, ChainApprox::Simple).unwrap();
/// assert_eq!(borders.len(), 1);
/// assert_eq!(borders.borders[0].len(), 4);
/// ```
pub fn find_contours(
    pix: &Pix,
    mode: RetrievalMode,
    approx: ChainApprox,
) -> RegionResult<ImageBorders> {
    let bin = pix.to_binary();
    let (w, h) = (bin.width() as i32, bin.height() as i32);
    let mut grid = LabelGrid::from_pix(&bin);
    let mut borders: Vec<Border> = Vec::new();
    let mut nbd: i32 = 1;

    for y in 1..=h {
        let mut lnbd: i32 = 1;
        for x in 1..=w {
            let f = grid.get(x, y);
            if f == 0 {
                continue;
            }

            let start = if f == 1 && grid.get(x - 1, y) == 0 {
                Some((BorderType::Outer, Direction::West))
            } else if f >= 1 && grid.get(x + 1, y) == 0 {
                if f > 1 {
                    lnbd = f;
                }
                Some((BorderType::Hole, Direction::East))
            } else {
                None
            };

            if let Some((border_type, from)) = start {
                nbd += 1;
                let parent = parent_of(border_type, lnbd, &borders);
                let points = follow_border(&mut grid, x, y, from, nbd, approx);
                borders.push(Border {
                    border_type,
                    parent,
                    points,
                });
            }

            let f = grid.get(x, y);
            if f != 1 {
                lnbd = f.abs();
            }
        }
    }

    let borders = match mode {
        RetrievalMode::Tree => borders,
        RetrievalMode::List => borders
            .into_iter()
            .map(|b| Border { parent: None, ..b })
            .collect(),
        RetrievalMode::CComp => borders
            .into_iter()
            .map(|b| match b.border_type {
                BorderType::Outer => Border { parent: None, ..b },
                BorderType::Hole => b,
            })
            .collect(),
        RetrievalMode::External => borders
            .into_iter()
            .filter(|b| b.border_type == BorderType::Outer && b.parent.is_none())
            .collect(),
    };

    tracing::trace!(?mode, count = borders.len(), "borders found");
    Ok(ImageBorders {
        width: bin.width(),
        height: bin.height(),
        borders,
    })
}

/// Parent of a new border given the last border label met on its row.
fn parent_of(border_type: BorderType, lnbd: i32, borders: &[Border]) -> Option<usize> {
    // Label 1 is the frame: a hole-type border with no parent.
    let (lnbd_index, lnbd_type, lnbd_parent) = if lnbd <= 1 {
        (None, BorderType::Hole, None)
    } else {
        let idx = (lnbd - 2) as usize;
        (Some(idx), borders[idx].border_type, borders[idx].parent)
    };
    if border_type == lnbd_type {
        lnbd_parent
    } else {
        lnbd_index
    }
}

/// Trace one border starting at (x, y) in grid coordinates.
///
/// `from` points at the background neighbor that triggered the start.
/// Returns the border in image coordinates.
fn follow_border(
    grid: &mut LabelGrid,
    x: i32,
    y: i32,
    from: Direction,
    nbd: i32,
    approx: ChainApprox,
) -> Pta {
    let mut points = Pta::new();

    // Clockwise from `from` for the first nonzero neighbor.
    let mut first = None;
    let mut d = from;
    for _ in 0..8 {
        d = d.cw();
        if grid.get(x + d.dx(), y + d.dy()) != 0 {
            first = Some(d);
            break;
        }
    }
    let Some(first) = first else {
        grid.set(x, y, -nbd);
        points.push(x - 1, y - 1);
        return points;
    };

    let (x1, y1) = (x + first.dx(), y + first.dy());
    let (mut x3, mut y3) = (x, y);
    let mut back = first;
    let mut prev_s = first.reverse();

    loop {
        // Counterclockwise from the pixel after `back`.
        let mut east_zero = false;
        let mut s = back;
        let mut d = back;
        for _ in 0..8 {
            d = d.ccw();
            if grid.get(x3 + d.dx(), y3 + d.dy()) != 0 {
                s = d;
                break;
            }
            if d == Direction::East {
                east_zero = true;
            }
        }

        if east_zero {
            grid.set(x3, y3, -nbd);
        } else if grid.get(x3, y3) == 1 {
            grid.set(x3, y3, nbd);
        }

        if approx == ChainApprox::None || s != prev_s {
            points.push(x3 - 1, y3 - 1);
            prev_s = s;
        }

        let (x4, y4) = (x3 + s.dx(), y3 + s.dy());
        if x4 == x && y4 == y && x3 == x1 && y3 == y1 {
            break;
        }
        back = s.reverse();
        x3 = x4;
        y3 = y4;
    }

    points
}
