use {
    aoc_2021::*,
    nom::{
        bytes::complete::{tag, take_while1},
        character::complete::line_ending,
        combinator::map_opt,
        error::Error,
        multi::separated_list1,
        sequence::separated_pair,
        Err, IResult,
    },
    std::collections::HashMap,
};

#[derive(Debug, PartialEq)]
struct Cave {
    name: String,
    small: bool,
    neighbors: Vec<usize>,
}

impl Cave {
    fn new<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();
        let small: bool = name.chars().all(|c: char| c.is_ascii_lowercase());

        Self {
            name,
            small,
            neighbors: Vec::new(),
        }
    }
}

#[derive(Debug, PartialEq)]
struct Solution {
    caves: Vec<Cave>,
    start: usize,
    end: usize,
}

impl Solution {
    const START: &'static str = "start";
    const END: &'static str = "end";

    fn parse_cave_name(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c.is_ascii_alphabetic())(input)
    }

    fn parse(input: &str) -> IResult<&str, Self> {
        map_opt(
            separated_list1(
                line_ending,
                separated_pair(Self::parse_cave_name, tag("-"), Self::parse_cave_name),
            ),
            Self::try_from_edges,
        )(input)
    }

    fn intern<'n>(
        caves: &mut Vec<Cave>,
        indices: &mut HashMap<&'n str, usize>,
        name: &'n str,
    ) -> usize {
        *indices.entry(name).or_insert_with(|| {
            caves.push(Cave::new(name));

            caves.len() - 1_usize
        })
    }

    fn try_from_edges(edges: Vec<(&str, &str)>) -> Option<Self> {
        let mut caves: Vec<Cave> = Vec::new();
        let mut indices: HashMap<&str, usize> = HashMap::new();

        for (cave_a, cave_b) in edges {
            let index_a: usize = Self::intern(&mut caves, &mut indices, cave_a);
            let index_b: usize = Self::intern(&mut caves, &mut indices, cave_b);

            caves[index_a].neighbors.push(index_b);
            caves[index_b].neighbors.push(index_a);
        }

        let start: usize = *indices.get(Self::START)?;
        let end: usize = *indices.get(Self::END)?;

        Some(Self { caves, start, end })
    }

    /// Counts the distinct paths from `start` to `end`
    ///
    /// Big caves may be revisited freely. A small cave may be visited at most once, except that
    /// when `allow_second_small_visit` is set, a single small cave (never `start`) may be visited
    /// twice over the course of one path.
    fn count_paths(&self, allow_second_small_visit: bool) -> usize {
        let mut visit_counts: Vec<usize> = vec![0_usize; self.caves.len()];

        self.count_paths_from(self.start, allow_second_small_visit, &mut visit_counts)
    }

    fn count_paths_from(
        &self,
        cave_index: usize,
        allow_second_small_visit: bool,
        visit_counts: &mut Vec<usize>,
    ) -> usize {
        if cave_index == self.end {
            return 1_usize;
        }

        visit_counts[cave_index] += 1_usize;

        let mut paths: usize = 0_usize;

        for &neighbor in &self.caves[cave_index].neighbors {
            if neighbor == self.start {
                continue;
            }

            paths += if self.caves[neighbor].small && visit_counts[neighbor] > 0_usize {
                if allow_second_small_visit {
                    self.count_paths_from(neighbor, false, visit_counts)
                } else {
                    0_usize
                }
            } else {
                self.count_paths_from(neighbor, allow_second_small_visit, visit_counts)
            };
        }

        visit_counts[cave_index] -= 1_usize;

        paths
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day12.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input.trim_end()) {
                    Ok(solution) => {
                        println!(
                            "solution.count_paths(false) == {}",
                            solution.count_paths(false)
                        );
                        println!(
                            "solution.count_paths(true) == {}",
                            solution.count_paths(true)
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
