use {
    aoc_2021::*,
    serde_json::Value,
    std::ops::Add,
};

#[derive(Debug)]
enum ParseSnailfishNumberError {
    InvalidJson(serde_json::Error),
    InvalidValue(Value),
}

/// A snailfish number: a binary tree with regular numbers at the leaves
#[derive(Clone, Debug, PartialEq)]
enum SnailfishNumber {
    Regular(u32),
    Pair(Box<Self>, Box<Self>),
}

impl SnailfishNumber {
    const EXPLODE_DEPTH: usize = 4_usize;
    const SPLIT_THRESHOLD: u32 = 10_u32;

    fn magnitude(&self) -> u32 {
        match self {
            Self::Regular(value) => *value,
            Self::Pair(left, right) => 3_u32 * left.magnitude() + 2_u32 * right.magnitude(),
        }
    }

    fn deposit_leftmost(&mut self, value: u32) {
        match self {
            Self::Regular(regular) => *regular += value,
            Self::Pair(left, _) => left.deposit_leftmost(value),
        }
    }

    fn deposit_rightmost(&mut self, value: u32) {
        match self {
            Self::Regular(regular) => *regular += value,
            Self::Pair(_, right) => right.deposit_rightmost(value),
        }
    }

    /// Explodes the leftmost pair nested at least four deep, if any
    ///
    /// The exploding pair is replaced by the regular number 0. Its left value is added to the
    /// nearest regular number to the left, and its right value to the nearest regular number to
    /// the right. A value still awaiting a home is handed up through the return value.
    fn explode(&mut self, depth: usize) -> Option<(Option<u32>, Option<u32>)> {
        match self {
            Self::Regular(_) => None,
            Self::Pair(left, right) => {
                if depth >= Self::EXPLODE_DEPTH {
                    if let (Self::Regular(left_value), Self::Regular(right_value)) =
                        (left.as_ref(), right.as_ref())
                    {
                        let left_value: u32 = *left_value;
                        let right_value: u32 = *right_value;

                        *self = Self::Regular(0_u32);

                        return Some((Some(left_value), Some(right_value)));
                    }
                }

                if let Some((left_value, right_value)) = left.explode(depth + 1_usize) {
                    if let Some(right_value) = right_value {
                        right.deposit_leftmost(right_value);
                    }

                    Some((left_value, None))
                } else if let Some((left_value, right_value)) = right.explode(depth + 1_usize) {
                    if let Some(left_value) = left_value {
                        left.deposit_rightmost(left_value);
                    }

                    Some((None, right_value))
                } else {
                    None
                }
            }
        }
    }

    /// Splits the leftmost regular number of ten or more, if any, into a pair of its halves
    /// (rounding the left down and the right up)
    fn split(&mut self) -> bool {
        match self {
            Self::Regular(regular) => {
                let regular: u32 = *regular;

                if regular >= Self::SPLIT_THRESHOLD {
                    let half: u32 = regular / 2_u32;

                    *self = Self::Pair(
                        Box::new(Self::Regular(half)),
                        Box::new(Self::Regular(regular - half)),
                    );

                    true
                } else {
                    false
                }
            }
            Self::Pair(left, right) => left.split() || right.split(),
        }
    }

    /// Repeatedly explodes and splits until neither action applies, exploding taking priority
    fn reduce(&mut self) {
        while self.explode(0_usize).is_some() || self.split() {}
    }
}

impl Add for SnailfishNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut sum: Self = Self::Pair(Box::new(self), Box::new(rhs));

        sum.reduce();

        sum
    }
}

impl TryFrom<&Value> for SnailfishNumber {
    type Error = ParseSnailfishNumberError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => match number.as_u64().map(u32::try_from) {
                Some(Ok(regular)) => Ok(Self::Regular(regular)),
                _ => Err(ParseSnailfishNumberError::InvalidValue(value.clone())),
            },
            Value::Array(elements) if elements.len() == 2_usize => Ok(Self::Pair(
                Box::new(Self::try_from(&elements[0_usize])?),
                Box::new(Self::try_from(&elements[1_usize])?),
            )),
            _ => Err(ParseSnailfishNumberError::InvalidValue(value.clone())),
        }
    }
}

impl TryFrom<&str> for SnailfishNumber {
    type Error = ParseSnailfishNumberError;

    fn try_from(snailfish_number_str: &str) -> Result<Self, Self::Error> {
        Self::try_from(
            &serde_json::from_str::<Value>(snailfish_number_str)
                .map_err(ParseSnailfishNumberError::InvalidJson)?,
        )
    }
}

#[derive(Debug, PartialEq)]
struct Solution(Vec<SnailfishNumber>);

impl Solution {
    fn sum(&self) -> Option<SnailfishNumber> {
        self.0.iter().cloned().reduce(SnailfishNumber::add)
    }

    fn sum_magnitude(&self) -> Option<u32> {
        self.sum().as_ref().map(SnailfishNumber::magnitude)
    }

    /// The largest magnitude obtainable by adding two distinct numbers of the list, in either
    /// order (snailfish addition is not commutative)
    fn largest_pair_sum_magnitude(&self) -> Option<u32> {
        let mut largest: Option<u32> = None;

        for (index_a, number_a) in self.0.iter().enumerate() {
            for (index_b, number_b) in self.0.iter().enumerate() {
                if index_a != index_b {
                    let magnitude: u32 = (number_a.clone() + number_b.clone()).magnitude();

                    if largest.map_or(true, |largest: u32| magnitude > largest) {
                        largest = Some(magnitude);
                    }
                }
            }
        }

        largest
    }
}

impl TryFrom<&str> for Solution {
    type Error = ParseSnailfishNumberError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        input
            .trim_end()
            .split('\n')
            .map(SnailfishNumber::try_from)
            .collect::<Result<Vec<SnailfishNumber>, Self::Error>>()
            .map(Self)
    }
}

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day18.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input) {
                    Ok(solution) => {
                        println!(
                            "solution.sum_magnitude() == {:?}",
                            solution.sum_magnitude()
                        );
                        println!(
                            "solution.largest_pair_sum_magnitude() == {:?}",
                            solution.largest_pair_sum_magnitude()
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
