use {
    glam::IVec2,
    memmap::Mmap,
    nom::{
        bytes::complete::tag,
        character::complete::digit1,
        combinator::{map, map_res, opt},
        sequence::tuple,
        IResult,
    },
    num::Integer,
    static_assertions::const_assert,
    std::{
        fmt::{Debug, DebugList, Formatter, Result as FmtResult},
        fs::File,
        io::{Error, ErrorKind, Result as IoResult},
        iter::Peekable,
        mem::transmute,
        str::{from_utf8, FromStr, Split, Utf8Error},
    },
    strum::EnumCount as EnumCountTrait,
    strum_macros::{EnumCount, EnumIter},
};

pub use {
    self::{direction::*, graph::*},
    clap::Parser,
};

mod graph;

/// Arguments for program execution
///
/// Currently, this is just an input file path, but it may be more later. The default is
/// intentionally left empty such that multiple day programs can use the same struct without
/// needing to re-define it with a different default path.
#[derive(Parser)]
pub struct Args {
    /// Input file path
    #[arg(short, long, default_value_t)]
    input_file_path: String,
}

impl Args {
    /// Returns the input file path, or a provided default if the field is empty
    ///
    /// # Arguments
    ///
    /// * `default` - A default input file path string slice to use if `self.input_file_path` is
    ///   empty
    pub fn input_file_path<'a>(&'a self, default: &'a str) -> &'a str {
        if self.input_file_path.is_empty() {
            default
        } else {
            &self.input_file_path
        }
    }
}

/// Opens a memory-mapped UTF-8 file at a specified path, and passes in a `&str` over the file to a
/// provided callback function
///
/// # Arguments
///
/// * `file_path` - A string slice file path to open as a read-only file
/// * `f` - A callback function to invoke on the contents of the file as a string slice
///
/// # Errors
///
/// This function returns a `Result::Err`-wrapped `std::io::Error` if an error has occurred.
/// Possible causes are:
///
/// * `std::fs::File::open` was unable to open a read-only file at `file_path`
/// * `memmap::Mmap::map` fails to create an `Mmap` instance for the opened file
/// * `std::str::from_utf8` determines the file is not in valid UTF-8 format
///
/// `f` is only executed *iff* an error is not encountered.
///
/// # Safety
///
/// This function uses `Mmap::map`, which is an unsafe function. There is no guarantee that an
/// external process won't modify the file after it is opened as read-only.
///
/// # Undefined Behavior
///
/// Related to the **Safety** section above, it is UB if the opened file is modified by an external
/// process while this function is referring to it as an immutable string slice. For more info on
/// this, see:
///
/// * https://www.reddit.com/r/rust/comments/wyq3ih/why_are_memorymapped_files_unsafe/
/// * https://users.rust-lang.org/t/how-unsafe-is-mmap/19635
/// * https://users.rust-lang.org/t/is-there-no-safe-way-to-use-mmap-in-rust/70338
pub unsafe fn open_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> Error {
        Error::new(ErrorKind::InvalidData, utf8_error)
    })?;

    Ok(f(utf8_str))
}

pub const ZERO_OFFSET: u8 = b'0';

pub fn parse_integer<'i, I: FromStr + Integer>(input: &'i str) -> IResult<&'i str, I> {
    map(
        tuple((
            map(opt(tag("-")), |minus| {
                if minus.is_some() {
                    I::zero() - I::one()
                } else {
                    I::one()
                }
            }),
            map_res(digit1, I::from_str),
        )),
        |(sign, bound)| sign * bound,
    )(input)
}

mod direction {
    use super::*;

    macro_rules! define_direction {
        {
            $(#[$meta:meta])*
            $vis:vis enum $direction:ident {
                $( $variant:ident, )*
            }
        } => {
            $(#[$meta])*
            $vis enum $direction {
                $( $variant, )*
            }

            const VECS: [IVec2; $direction::COUNT] = [
                $( $direction::$variant.vec_internal(), )*
            ];
        };
    }

    define_direction! {
        #[derive(Copy, Clone, Debug, EnumCount, EnumIter, PartialEq)]
        #[repr(u8)]
        pub enum Direction {
            North,
            East,
            South,
            West,
        }
    }

    // This guarantees we can safely convert from `u8` to `Direction` by masking the smallest 2
    // bits, which is the same as masking by `U8_MASK`
    const_assert!(Direction::COUNT == 4_usize);

    impl Direction {
        const U8_MASK: u8 = Self::COUNT as u8 - 1_u8;

        #[inline]
        pub const fn vec(self) -> IVec2 {
            VECS[self as usize]
        }

        #[inline]
        pub const fn from_u8(value: u8) -> Self {
            // SAFETY: See `const_assert` above
            unsafe { transmute(value & Self::U8_MASK) }
        }

        const fn vec_internal(self) -> IVec2 {
            match self {
                Self::North => IVec2::NEG_Y,
                Self::East => IVec2::X,
                Self::South => IVec2::Y,
                Self::West => IVec2::NEG_X,
            }
        }
    }

    impl From<Direction> for IVec2 {
        fn from(value: Direction) -> Self {
            value.vec()
        }
    }

    impl From<u8> for Direction {
        fn from(value: u8) -> Self {
            Self::from_u8(value)
        }
    }

    impl TryFrom<IVec2> for Direction {
        type Error = ();

        fn try_from(value: IVec2) -> Result<Self, Self::Error> {
            VECS.iter()
                .position(|vec| *vec == value)
                .map(|index| (index as u8).into())
                .ok_or(())
        }
    }
}

pub struct SideLen(pub usize);

impl From<SideLen> for IVec2 {
    fn from(side_len: SideLen) -> Self {
        IVec2::new(side_len.0 as i32, side_len.0 as i32)
    }
}

#[derive(Clone)]
pub struct Grid<T> {
    cells: Vec<T>,

    /// Should only contain unsigned values, but is signed for ease of use for iterating
    dimensions: IVec2,
}

impl<T> Grid<T> {
    pub fn try_from_cells_and_width(cells: Vec<T>, width: usize) -> Option<Self> {
        let cells_len: usize = cells.len();

        if cells_len % width != 0_usize {
            None
        } else {
            Some(Self {
                cells,
                dimensions: IVec2::new(width as i32, (cells_len / width) as i32),
            })
        }
    }

    pub fn try_from_cells_and_dimensions(cells: Vec<T>, dimensions: IVec2) -> Option<Self> {
        if cells.len() == (dimensions.x * dimensions.y) as usize {
            Some(Self { cells, dimensions })
        } else {
            None
        }
    }

    pub fn allocate(dimensions: IVec2) -> Self {
        Self {
            cells: Vec::with_capacity((dimensions.x * dimensions.y) as usize),
            dimensions,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    #[inline]
    pub fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.dimensions).all()
    }

    #[inline]
    pub fn index_from_pos(&self, pos: IVec2) -> usize {
        pos.y as usize * self.dimensions.x as usize + pos.x as usize
    }

    pub fn try_index_from_pos(&self, pos: IVec2) -> Option<usize> {
        if self.contains(pos) {
            Some(self.index_from_pos(pos))
        } else {
            None
        }
    }

    pub fn pos_from_index(&self, index: usize) -> IVec2 {
        let x: usize = self.dimensions.x as usize;

        IVec2::new((index % x) as i32, (index / x) as i32)
    }

    #[inline(always)]
    pub fn max_dimensions(&self) -> IVec2 {
        self.dimensions - IVec2::ONE
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = IVec2> {
        let dimensions: IVec2 = self.dimensions;

        (0_i32..dimensions.y)
            .flat_map(move |y: i32| (0_i32..dimensions.x).map(move |x: i32| IVec2::new(x, y)))
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &self.cells[index])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &mut self.cells[index])
    }
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Grid")?;
        let mut y_list: DebugList = f.debug_list();

        for y in 0_i32..self.dimensions.y {
            let start: usize = (y * self.dimensions.x) as usize;

            y_list.entry(&&self.cells[start..(start + self.dimensions.x as usize)]);
        }

        y_list.finish()
    }
}

impl<T: Default> Grid<T> {
    pub fn default(dimensions: IVec2) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize_with(capacity, T::default);

        Self { cells, dimensions }
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cells == other.cells
    }
}

#[allow(dead_code)]
#[derive(Debug, PartialEq)]
pub enum GridParseError<'s, E> {
    NoInitialToken,
    IsNotAscii(&'s str),
    InvalidLength { line: &'s str, expected_len: usize },
    CellParseError(E),
}

impl<'s, E, T: TryFrom<char, Error = E>> TryFrom<&'s str> for Grid<T> {
    type Error = GridParseError<'s, E>;

    fn try_from(grid_str: &'s str) -> Result<Self, Self::Error> {
        use GridParseError as Error;

        let mut grid_line_iter: Peekable<Split<char>> = grid_str.split('\n').peekable();

        let side_len: usize = grid_line_iter
            .peek()
            .filter(|line| !line.is_empty())
            .ok_or(Error::NoInitialToken)?
            .len();

        let mut grid: Grid<T> = Grid::allocate(SideLen(side_len).into());
        let mut lines: usize = 0_usize;

        for grid_line_str in grid_line_iter {
            if !grid_line_str.is_ascii() {
                return Err(Error::IsNotAscii(grid_line_str));
            }

            if grid_line_str.len() != side_len {
                return Err(Error::InvalidLength {
                    line: grid_line_str,
                    expected_len: side_len,
                });
            }

            for cell_char in grid_line_str.chars() {
                grid.cells
                    .push(cell_char.try_into().map_err(Error::CellParseError)?);
            }

            lines += 1_usize;
        }

        if lines != side_len {
            grid.dimensions.y = lines as i32;
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, strum::IntoEnumIterator};

    #[derive(Debug, PartialEq)]
    struct Digit(u8);

    impl TryFrom<char> for Digit {
        type Error = char;

        fn try_from(digit_char: char) -> Result<Self, Self::Error> {
            if digit_char.is_ascii_digit() {
                Ok(Self(digit_char as u8 - ZERO_OFFSET))
            } else {
                Err(digit_char)
            }
        }
    }

    #[test]
    fn test_grid_try_from_str() {
        assert_eq!(
            Grid::try_from("012\n345"),
            Ok(Grid::try_from_cells_and_dimensions(
                vec![Digit(0), Digit(1), Digit(2), Digit(3), Digit(4), Digit(5)],
                IVec2::new(3_i32, 2_i32),
            )
            .unwrap())
        );
        assert_eq!(
            Grid::try_from("012\n345"),
            Ok(Grid::try_from_cells_and_width(
                vec![Digit(0), Digit(1), Digit(2), Digit(3), Digit(4), Digit(5)],
                3_usize,
            )
            .unwrap())
        );
        assert_eq!(
            Grid::<Digit>::try_from(""),
            Err(GridParseError::NoInitialToken)
        );
        assert_eq!(
            Grid::<Digit>::try_from("012\n34"),
            Err(GridParseError::InvalidLength {
                line: "34",
                expected_len: 3_usize
            })
        );
        assert_eq!(
            Grid::<Digit>::try_from("01\n2a"),
            Err(GridParseError::CellParseError('a'))
        );
    }

    #[test]
    fn test_grid_pos_and_index() {
        let mut grid: Grid<Digit> = Grid::try_from("012\n345").unwrap();

        assert_eq!(grid.dimensions(), IVec2::new(3_i32, 2_i32));
        assert_eq!(grid.index_from_pos(IVec2::new(2_i32, 1_i32)), 5_usize);
        assert_eq!(grid.pos_from_index(5_usize), IVec2::new(2_i32, 1_i32));
        assert_eq!(grid.try_index_from_pos(IVec2::new(3_i32, 0_i32)), None);
        assert_eq!(grid.get(IVec2::new(1_i32, 1_i32)), Some(&Digit(4_u8)));

        *grid.get_mut(IVec2::new(1_i32, 1_i32)).unwrap() = Digit(9_u8);

        assert_eq!(grid.get(IVec2::new(1_i32, 1_i32)), Some(&Digit(9_u8)));
        assert_eq!(
            grid.iter_positions().collect::<Vec<IVec2>>(),
            vec![
                IVec2::new(0_i32, 0_i32),
                IVec2::new(1_i32, 0_i32),
                IVec2::new(2_i32, 0_i32),
                IVec2::new(0_i32, 1_i32),
                IVec2::new(1_i32, 1_i32),
                IVec2::new(2_i32, 1_i32),
            ]
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer::<i32>("20..30"), Ok(("..30", 20_i32)));
        assert_eq!(parse_integer::<i32>("-10, y"), Ok((", y", -10_i32)));
        assert!(parse_integer::<i32>("x=20").is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(
            Direction::iter().map(Direction::vec).collect::<Vec<IVec2>>(),
            vec![IVec2::NEG_Y, IVec2::X, IVec2::Y, IVec2::NEG_X]
        );

        for (index, direction) in Direction::iter().enumerate() {
            assert_eq!(
                Direction::from_u8(index as u8 + Direction::COUNT as u8),
                direction
            );
            assert_eq!(Direction::try_from(direction.vec()), Ok(direction));
        }

        assert_eq!(Direction::try_from(IVec2::ZERO), Err(()));
    }
}
