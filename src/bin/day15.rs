use {
    aoc_2021::*,
    derive_deref::Deref,
    glam::IVec2,
    std::ops::Add,
    strum::IntoEnumIterator,
};

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
struct RiskLevel(u8);

#[derive(Debug, PartialEq)]
struct InvalidRiskLevelChar(char);

impl RiskLevel {
    const MIN: u8 = 1_u8;
    const MAX: u8 = 9_u8;
}

/// Risk levels cycle over `MIN..=MAX`: one above `MAX` wraps back around to `MIN`
impl Add<u8> for RiskLevel {
    type Output = Self;

    fn add(self, rhs: u8) -> Self::Output {
        Self((self.0 + rhs - Self::MIN) % Self::MAX + Self::MIN)
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<char> for RiskLevel {
    type Error = InvalidRiskLevelChar;

    fn try_from(risk_level_char: char) -> Result<Self, Self::Error> {
        if ((Self::MIN + ZERO_OFFSET) as char..=(Self::MAX + ZERO_OFFSET) as char)
            .contains(&risk_level_char)
        {
            Ok(Self(risk_level_char as u8 - ZERO_OFFSET))
        } else {
            Err(InvalidRiskLevelChar(risk_level_char))
        }
    }
}

#[derive(Clone, Debug, Deref, PartialEq)]
struct Solution(Grid<RiskLevel>);

impl Solution {
    const EXPANSION_MULTIPLE: i32 = 5_i32;

    /// Tiles the cave `multiple` times in both dimensions, bumping each tile's risk levels by its
    /// tile coordinate sum per the wrapping `RiskLevel` addition
    fn expanded(&self, multiple: i32) -> Self {
        let base_dimensions: IVec2 = self.dimensions();
        let mut expanded: Grid<RiskLevel> = Grid::default(base_dimensions * multiple);

        for index in 0_usize..expanded.cells().len() {
            let pos: IVec2 = expanded.pos_from_index(index);
            let tile: IVec2 = pos / base_dimensions;
            let base_risk_level: RiskLevel = *self.get(pos % base_dimensions).unwrap();

            // The offset only matters mod `MAX`, which also keeps the `u8` cast lossless
            expanded.cells_mut()[index] =
                base_risk_level + ((tile.x + tile.y) % RiskLevel::MAX as i32) as u8;
        }

        Self(expanded)
    }

    /// One node per cell, one directed edge per orthogonal adjacency, weighted by the risk level
    /// of the cell the edge enters
    fn graph(&self) -> WeightedGraph<IVec2, u32> {
        let mut graph: WeightedGraph<IVec2, u32> = WeightedGraph::new();

        for pos in self.iter_positions() {
            graph.add_node(pos);
        }

        for pos in self.iter_positions() {
            for dir in Direction::iter() {
                let neighbor: IVec2 = pos + dir.vec();

                if let Some(risk_level) = self.get(neighbor) {
                    // Both endpoints were just registered above
                    graph.try_add_edge(pos, neighbor, risk_level.0 as u32).unwrap();
                }
            }
        }

        graph
    }

    fn lowest_total_risk(&self) -> Result<(u32, Vec<Edge<IVec2, u32>>), GraphError<IVec2>> {
        self.graph().shortest_path(IVec2::ZERO, self.max_dimensions())
    }
}

impl<'s> TryFrom<&'s str> for Solution {
    type Error = GridParseError<'s, InvalidRiskLevelChar>;

    fn try_from(cave_str: &'s str) -> Result<Self, Self::Error> {
        Ok(Self(Grid::try_from(cave_str.trim_end())?))
    }
}

fn report_lowest_total_risk(expression: &str, solution: &Solution) {
    match solution.lowest_total_risk() {
        Ok((total_risk, _)) => println!("{expression}.lowest_total_risk().0 == {total_risk}"),
        Err(error) => eprintln!("{expression}.lowest_total_risk() == Err({error:?})"),
    }
}

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day15.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input) {
                    Ok(solution) => {
                        report_lowest_total_risk("solution", &solution);
                        report_lowest_total_risk(
                            "solution.expanded(5)",
                            &solution.expanded(Solution::EXPANSION_MULTIPLE),
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
