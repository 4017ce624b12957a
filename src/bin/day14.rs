use {
    aoc_2021::*,
    nom::{
        bytes::complete::tag,
        character::complete::{line_ending, satisfy},
        combinator::map,
        error::Error,
        multi::{many1, separated_list1},
        sequence::{separated_pair, tuple},
        Err, IResult,
    },
    std::collections::HashMap,
};

type Element = u8;
type Pair = [Element; 2_usize];

#[derive(Debug, PartialEq)]
struct Solution {
    template: Vec<Element>,
    rules: HashMap<Pair, Element>,
}

impl Solution {
    const QUESTION_1_STEPS: usize = 10_usize;
    const QUESTION_2_STEPS: usize = 40_usize;

    fn parse_element(input: &str) -> IResult<&str, Element> {
        map(satisfy(|c: char| c.is_ascii_uppercase()), |c: char| {
            c as Element
        })(input)
    }

    fn parse(input: &str) -> IResult<&str, Self> {
        map(
            separated_pair(
                many1(Self::parse_element),
                tuple((line_ending, line_ending)),
                separated_list1(
                    line_ending,
                    separated_pair(
                        tuple((Self::parse_element, Self::parse_element)),
                        tag(" -> "),
                        Self::parse_element,
                    ),
                ),
            ),
            |(template, rule_list)| Self {
                template,
                rules: rule_list
                    .into_iter()
                    .map(|((element_a, element_b), inserted)| ([element_a, element_b], inserted))
                    .collect(),
            },
        )(input)
    }

    fn initial_pair_counts(&self) -> HashMap<Pair, usize> {
        let mut pair_counts: HashMap<Pair, usize> = HashMap::new();

        for pair in self.template.windows(2_usize) {
            *pair_counts.entry([pair[0_usize], pair[1_usize]]).or_default() += 1_usize;
        }

        pair_counts
    }

    /// Applies one round of pair insertion to the pair multiset
    ///
    /// A rule `AB -> C` rewrites every `AB` pair into an `AC` pair and a `CB` pair. Pairs with no
    /// matching rule carry over unchanged.
    fn step(&self, pair_counts: &HashMap<Pair, usize>) -> HashMap<Pair, usize> {
        let mut next_pair_counts: HashMap<Pair, usize> = HashMap::new();

        for (&pair, &count) in pair_counts {
            match self.rules.get(&pair) {
                Some(&inserted) => {
                    *next_pair_counts.entry([pair[0_usize], inserted]).or_default() += count;
                    *next_pair_counts.entry([inserted, pair[1_usize]]).or_default() += count;
                }
                None => {
                    *next_pair_counts.entry(pair).or_default() += count;
                }
            }
        }

        next_pair_counts
    }

    /// Tallies individual elements after `steps` rounds of insertion
    ///
    /// Each element of the polymer leads exactly one pair, except the final element, which never
    /// changes and is counted separately.
    fn element_counts_after_steps(&self, steps: usize) -> HashMap<Element, usize> {
        let mut pair_counts: HashMap<Pair, usize> = self.initial_pair_counts();

        for _ in 0_usize..steps {
            pair_counts = self.step(&pair_counts);
        }

        let mut element_counts: HashMap<Element, usize> = HashMap::new();

        for (&pair, &count) in &pair_counts {
            *element_counts.entry(pair[0_usize]).or_default() += count;
        }

        if let Some(&last_element) = self.template.last() {
            *element_counts.entry(last_element).or_default() += 1_usize;
        }

        element_counts
    }

    fn frequency_range_after_steps(&self, steps: usize) -> usize {
        let element_counts: HashMap<Element, usize> = self.element_counts_after_steps(steps);
        let max_count: usize = element_counts.values().copied().max().unwrap_or_default();
        let min_count: usize = element_counts.values().copied().min().unwrap_or_default();

        max_count - min_count
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
    let input_file_path: &str = args.input_file_path("input/day14.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input.trim_end()) {
                    Ok(solution) => {
                        println!(
                            "solution.frequency_range_after_steps(10) == {}",
                            solution.frequency_range_after_steps(Solution::QUESTION_1_STEPS)
                        );
                        println!(
                            "solution.frequency_range_after_steps(40) == {}",
                            solution.frequency_range_after_steps(Solution::QUESTION_2_STEPS)
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
        "NNCB\n",
        "\n",
        "CH -> B\n",
        "HH -> N\n",
        "CB -> H\n",
        "NH -> C\n",
        "HB -> C\n",
        "HC -> B\n",
        "HN -> C\n",
        "NN -> C\n",
        "BH -> H\n",
        "NC -> B\n",
        "NB -> B\n",
        "BN -> B\n",
        "BB -> N\n",
        "BC -> B\n",
        "CC -> N\n",
        "CN -> C",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| SOLUTION_STR.try_into().unwrap())
    }

    fn pair_counts_of(polymer: &str) -> HashMap<Pair, usize> {
        let mut pair_counts: HashMap<Pair, usize> = HashMap::new();

        for pair in polymer.as_bytes().windows(2_usize) {
            *pair_counts.entry([pair[0_usize], pair[1_usize]]).or_default() += 1_usize;
        }

        pair_counts
    }

    #[test]
    fn test_try_from_str() {
        let solution: &Solution = solution();

        assert_eq!(solution.template, b"NNCB".to_vec());
        assert_eq!(solution.rules.len(), 16_usize);
        assert_eq!(solution.rules.get(b"NN"), Some(&b'C'));
        assert_eq!(solution.rules.get(b"CN"), Some(&b'C'));
        assert!(Solution::try_from("NNCB").is_err());
    }

    #[test]
    fn test_step() {
        let solution: &Solution = solution();
        let mut pair_counts: HashMap<Pair, usize> = solution.initial_pair_counts();

        assert_eq!(pair_counts, pair_counts_of("NNCB"));

        pair_counts = solution.step(&pair_counts);

        assert_eq!(pair_counts, pair_counts_of("NCNBCHB"));

        pair_counts = solution.step(&pair_counts);

        assert_eq!(pair_counts, pair_counts_of("NBCCNBBBCBHCB"));

        pair_counts = solution.step(&pair_counts);

        assert_eq!(pair_counts, pair_counts_of("NBBBCNCCNBBNBNBBCHBHHBCHB"));
    }

    #[test]
    fn test_element_counts_after_steps() {
        let element_counts: HashMap<Element, usize> =
            solution().element_counts_after_steps(Solution::QUESTION_1_STEPS);

        assert_eq!(element_counts.get(&b'B'), Some(&1749_usize));
        assert_eq!(element_counts.get(&b'C'), Some(&298_usize));
        assert_eq!(element_counts.get(&b'H'), Some(&161_usize));
        assert_eq!(element_counts.get(&b'N'), Some(&865_usize));
    }

    #[test]
    fn test_frequency_range_after_steps() {
        assert_eq!(
            solution().frequency_range_after_steps(Solution::QUESTION_1_STEPS),
            1588_usize
        );
        assert_eq!(
            solution().frequency_range_after_steps(Solution::QUESTION_2_STEPS),
            2188189693529_usize
        );
    }
}
