use {
    aoc_2021::*,
    glam::IVec2,
    nom::{
        bytes::complete::tag,
        error::Error,
        sequence::{preceded, separated_pair},
        Err, IResult,
    },
    std::ops::RangeInclusive,
};

#[derive(Debug, PartialEq)]
struct Solution {
    x_range: RangeInclusive<i32>,
    y_range: RangeInclusive<i32>,
}

impl Solution {
    fn parse_range(input: &str) -> IResult<&str, RangeInclusive<i32>> {
        let (input, (start, end)) =
            separated_pair(parse_integer::<i32>, tag(".."), parse_integer::<i32>)(input)?;

        Ok((input, start..=end))
    }

    fn parse(input: &str) -> IResult<&str, Self> {
        let (input, (x_range, y_range)) = preceded(
            tag("target area: "),
            separated_pair(
                preceded(tag("x="), Self::parse_range),
                tag(", "),
                preceded(tag("y="), Self::parse_range),
            ),
        )(input)?;

        Ok((input, Self { x_range, y_range }))
    }

    fn contains(&self, pos: IVec2) -> bool {
        self.x_range.contains(&pos.x) && self.y_range.contains(&pos.y)
    }

    /// Simulates a probe launched with `velocity`, returning its peak height if it ever occupies
    /// the target area
    ///
    /// Each step moves the probe by its velocity, then drag pulls the horizontal speed toward zero
    /// and gravity drops the vertical speed by one. Once the probe is below the target and
    /// falling, it can never return.
    fn try_shot(&self, mut velocity: IVec2) -> Option<i32> {
        let mut pos: IVec2 = IVec2::ZERO;
        let mut max_height: i32 = 0_i32;

        loop {
            pos += velocity;
            velocity.x -= velocity.x.signum();
            velocity.y -= 1_i32;
            max_height = max_height.max(pos.y);

            if self.contains(pos) {
                return Some(max_height);
            }

            if pos.y < *self.y_range.start() && velocity.y < 0_i32 {
                return None;
            }
        }
    }

    /// Iterates over the peak heights of all launch velocities that hit the target area
    ///
    /// The search is bounded: any `x` velocity past the far edge overshoots on the first step, and
    /// any `y` speed past the bottom edge's magnitude does the same (a positive `y` velocity
    /// returns to height zero moving at its negation).
    fn iter_hit_max_heights(&self) -> impl Iterator<Item = i32> + '_ {
        let y_speed_limit: i32 = self.y_range.start().abs();

        (0_i32..=*self.x_range.end()).flat_map(move |x_velocity: i32| {
            (-y_speed_limit..=y_speed_limit).filter_map(move |y_velocity: i32| {
                self.try_shot(IVec2::new(x_velocity, y_velocity))
            })
        })
    }

    fn highest_shot_height(&self) -> Option<i32> {
        self.iter_hit_max_heights().max()
    }

    fn distinct_hitting_velocities(&self) -> usize {
        self.iter_hit_max_heights().count()
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
    let input_file_path: &str = args.input_file_path("input/day17.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input.trim_end()) {
                    Ok(solution) => {
                        println!(
                            "solution.highest_shot_height() == {:?}",
                            solution.highest_shot_height()
                        );
                        println!(
                            "solution.distinct_hitting_velocities() == {}",
                            solution.distinct_hitting_velocities()
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
