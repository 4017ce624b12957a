use {
    aoc_2021::*,
    bitvec::prelude::*,
    derive_deref::{Deref, DerefMut},
    glam::IVec2,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
struct EnergyLevel(u8);

#[derive(Debug, PartialEq)]
struct InvalidEnergyLevelChar(char);

impl EnergyLevel {
    /// An octopus flashes once its energy level climbs *past* this
    const FLASH_THRESHOLD: u8 = 9_u8;
}

impl TryFrom<char> for EnergyLevel {
    type Error = InvalidEnergyLevelChar;

    fn try_from(energy_level_char: char) -> Result<Self, Self::Error> {
        if energy_level_char.is_ascii_digit() {
            Ok(Self(energy_level_char as u8 - ZERO_OFFSET))
        } else {
            Err(InvalidEnergyLevelChar(energy_level_char))
        }
    }
}

#[derive(Clone, Debug, Deref, DerefMut, PartialEq)]
struct Solution(Grid<EnergyLevel>);

impl Solution {
    const STEPS: usize = 100_usize;

    fn iter_neighbors(pos: IVec2) -> impl Iterator<Item = IVec2> {
        (-1_i32..=1_i32)
            .flat_map(move |y_delta: i32| {
                (-1_i32..=1_i32).map(move |x_delta: i32| pos + IVec2::new(x_delta, y_delta))
            })
            .filter(move |neighbor: &IVec2| *neighbor != pos)
    }

    /// Advances the cavern one step, returning how many octopuses flashed
    ///
    /// Every energy level gains one, then any octopus over the threshold flashes, bumping all 8
    /// neighbors (cascading). An octopus flashes at most once per step, drops to 0, and ignores
    /// further bumps until the step ends.
    fn step(&mut self) -> usize {
        let mut flashed: BitVec = bitvec![0; self.cells().len()];
        let mut pending: Vec<IVec2> = Vec::new();

        for index in 0_usize..self.cells().len() {
            self.cells_mut()[index].0 += 1_u8;

            if self.cells()[index].0 > EnergyLevel::FLASH_THRESHOLD {
                pending.push(self.pos_from_index(index));
            }
        }

        let mut flashes: usize = 0_usize;

        while let Some(pos) = pending.pop() {
            let index: usize = self.index_from_pos(pos);

            if flashed[index] {
                continue;
            }

            flashed.set(index, true);
            flashes += 1_usize;
            self.cells_mut()[index] = EnergyLevel::default();

            for neighbor in Self::iter_neighbors(pos) {
                if let Some(neighbor_index) = self.try_index_from_pos(neighbor) {
                    if !flashed[neighbor_index] {
                        self.cells_mut()[neighbor_index].0 += 1_u8;

                        if self.cells()[neighbor_index].0 > EnergyLevel::FLASH_THRESHOLD {
                            pending.push(neighbor);
                        }
                    }
                }
            }
        }

        flashes
    }

    fn flashes_after_steps(&mut self, steps: usize) -> usize {
        (0_usize..steps).map(|_| self.step()).sum()
    }

    /// The first step on which every octopus flashes at once
    fn first_synchronized_step(&mut self) -> usize {
        let cell_count: usize = self.cells().len();

        (1_usize..).find(|_| self.step() == cell_count).unwrap()
    }
}

impl<'s> TryFrom<&'s str> for Solution {
    type Error = GridParseError<'s, InvalidEnergyLevelChar>;

    fn try_from(cavern_str: &'s str) -> Result<Self, Self::Error> {
        Ok(Self(Grid::try_from(cavern_str.trim_end())?))
    }
}

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day11.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input) {
                    Ok(solution) => {
                        let mut flash_counter: Solution = solution.clone();

                        println!(
                            "solution.flashes_after_steps(100) == {}",
                            flash_counter.flashes_after_steps(Solution::STEPS)
                        );

                        let mut synchronizer: Solution = solution;

                        println!(
                            "solution.first_synchronized_step() == {}",
                            synchronizer.first_synchronized_step()
                        );
                    }
                    Err(error) => {
                        panic!("{error:#?}")
                    }
                },
            )
        }
    {
        eprintln!(
            "Encountered error {} when opening file \"{}\"",
            err, input_file_path
        );
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SOLUTION_STR: &str = concat!(
        "5483143223\n",
        "2745854711\n",
        "5264556173\n",
        "6141336146\n",
        "6357385478\n",
        "4167524645\n",
        "2176841721\n",
        "6882881134\n",
        "4846848554\n",
        "5283751526",
    );
    const SMALL_SOLUTION_STR: &str = concat!(
        "11111\n", //
        "19991\n", //
        "19191\n", //
        "19991\n", //
        "11111",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| SOLUTION_STR.try_into().unwrap())
    }

    #[test]
    fn test_try_from_str() {
        macro_rules! energy_levels {
            ($( $energy_level:expr, )*) => {
                vec![ $( EnergyLevel($energy_level), )* ]
            };
        }

        assert_eq!(
            SMALL_SOLUTION_STR.try_into(),
            Ok(Solution(
                Grid::try_from_cells_and_dimensions(
                    energy_levels![
                        1_u8, 1_u8, 1_u8, 1_u8, 1_u8, //
                        1_u8, 9_u8, 9_u8, 9_u8, 1_u8, //
                        1_u8, 9_u8, 1_u8, 9_u8, 1_u8, //
                        1_u8, 9_u8, 9_u8, 9_u8, 1_u8, //
                        1_u8, 1_u8, 1_u8, 1_u8, 1_u8, //
                    ],
                    IVec2::new(5_i32, 5_i32),
                )
                .unwrap()
            ))
        );
        assert_eq!(
            Solution::try_from("123\n4a6"),
            Err(GridParseError::CellParseError(InvalidEnergyLevelChar('a')))
        );
    }

    #[test]
    fn test_step() {
        let mut solution: Solution = SMALL_SOLUTION_STR.try_into().unwrap();

        assert_eq!(solution.step(), 9_usize);
        assert_eq!(
            solution,
            Solution::try_from("34543\n40004\n50005\n40004\n34543").unwrap()
        );
        assert_eq!(solution.step(), 0_usize);
        assert_eq!(
            solution,
            Solution::try_from("45654\n51115\n61116\n51115\n45654").unwrap()
        );
    }

    #[test]
    fn test_flashes_after_steps() {
        assert_eq!(solution().clone().flashes_after_steps(10_usize), 204_usize);
        assert_eq!(
            solution().clone().flashes_after_steps(Solution::STEPS),
            1656_usize
        );
    }

    #[test]
    fn test_first_synchronized_step() {
        assert_eq!(solution().clone().first_synchronized_step(), 195_usize);
    }
}
