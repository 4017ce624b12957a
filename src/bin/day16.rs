use {
    aoc_2021::*,
    bitvec::prelude::*,
    derive_deref::Deref,
};

#[derive(Debug, PartialEq)]
enum PacketDecodeError {
    InvalidHexadecimalChar(char),
    UnexpectedEndOfBits,
    LiteralOverflow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Operator {
    Sum,
    Product,
    Minimum,
    Maximum,
    GreaterThan,
    LessThan,
    EqualTo,
}

impl Operator {
    fn from_type_id(type_id: u8) -> Option<Self> {
        match type_id {
            0_u8 => Some(Self::Sum),
            1_u8 => Some(Self::Product),
            2_u8 => Some(Self::Minimum),
            3_u8 => Some(Self::Maximum),
            5_u8 => Some(Self::GreaterThan),
            6_u8 => Some(Self::LessThan),
            7_u8 => Some(Self::EqualTo),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
enum PacketPayload {
    Literal(u64),
    Operator {
        operator: Operator,
        packets: Vec<Packet>,
    },
}

#[derive(Debug, PartialEq)]
struct Packet {
    version: u8,
    payload: PacketPayload,
}

/// A cursor over the transmission's bit stream, consuming from the front
struct BitCursor<'b> {
    bits: &'b BitSlice<u8, Msb0>,
}

impl<'b> BitCursor<'b> {
    fn take(&mut self, bit_len: usize) -> Result<u64, PacketDecodeError> {
        if self.bits.len() < bit_len {
            Err(PacketDecodeError::UnexpectedEndOfBits)
        } else {
            let (taken, remaining) = self.bits.split_at(bit_len);

            self.bits = remaining;

            Ok(taken.load_be())
        }
    }

    fn remaining(&self) -> usize {
        self.bits.len()
    }
}

impl Packet {
    const VERSION_BIT_LEN: usize = 3_usize;
    const TYPE_ID_BIT_LEN: usize = 3_usize;
    const LITERAL_TYPE_ID: u8 = 4_u8;
    const LITERAL_GROUP_BIT_LEN: usize = 5_usize;
    const TOTAL_BIT_LEN_BIT_LEN: usize = 15_usize;
    const PACKET_COUNT_BIT_LEN: usize = 11_usize;

    fn decode(cursor: &mut BitCursor) -> Result<Self, PacketDecodeError> {
        let version: u8 = cursor.take(Self::VERSION_BIT_LEN)? as u8;
        let type_id: u8 = cursor.take(Self::TYPE_ID_BIT_LEN)? as u8;

        let payload: PacketPayload = if type_id == Self::LITERAL_TYPE_ID {
            let mut value: u64 = 0_u64;

            loop {
                let group: u64 = cursor.take(Self::LITERAL_GROUP_BIT_LEN)?;

                // The shift would push nonzero bits off the top
                if value >> (u64::BITS - 4_u32) != 0_u64 {
                    return Err(PacketDecodeError::LiteralOverflow);
                }

                value = value << 4_u32 | group & 0xF_u64;

                if group & 0x10_u64 == 0_u64 {
                    break;
                }
            }

            PacketPayload::Literal(value)
        } else {
            // Type IDs are 3 bits and 4 is claimed by literals, so the operator lookup is total
            let operator: Operator = Operator::from_type_id(type_id).unwrap();
            let mut packets: Vec<Packet> = Vec::new();

            if cursor.take(1_usize)? == 0_u64 {
                let total_bit_len: usize = cursor.take(Self::TOTAL_BIT_LEN_BIT_LEN)? as usize;
                let end_remaining: usize = cursor
                    .remaining()
                    .checked_sub(total_bit_len)
                    .ok_or(PacketDecodeError::UnexpectedEndOfBits)?;

                while cursor.remaining() > end_remaining {
                    packets.push(Self::decode(cursor)?);
                }
            } else {
                let packet_count: usize = cursor.take(Self::PACKET_COUNT_BIT_LEN)? as usize;

                for _ in 0_usize..packet_count {
                    packets.push(Self::decode(cursor)?);
                }
            }

            PacketPayload::Operator { operator, packets }
        };

        Ok(Self { version, payload })
    }

    fn version_sum(&self) -> u32 {
        self.version as u32
            + match &self.payload {
                PacketPayload::Literal(_) => 0_u32,
                PacketPayload::Operator { packets, .. } => {
                    packets.iter().map(Packet::version_sum).sum()
                }
            }
    }

    fn value(&self) -> u64 {
        match &self.payload {
            PacketPayload::Literal(value) => *value,
            PacketPayload::Operator { operator, packets } => {
                let mut values = packets.iter().map(Packet::value);

                match operator {
                    Operator::Sum => values.sum(),
                    Operator::Product => values.product(),
                    Operator::Minimum => values.min().unwrap(),
                    Operator::Maximum => values.max().unwrap(),
                    Operator::GreaterThan => {
                        (values.next().unwrap() > values.next().unwrap()) as u64
                    }
                    Operator::LessThan => (values.next().unwrap() < values.next().unwrap()) as u64,
                    Operator::EqualTo => (values.next().unwrap() == values.next().unwrap()) as u64,
                }
            }
        }
    }
}

#[derive(Debug, Deref, PartialEq)]
struct Solution(Packet);

impl TryFrom<&str> for Solution {
    type Error = PacketDecodeError;

    fn try_from(transmission_str: &str) -> Result<Self, Self::Error> {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();

        for hexadecimal_char in transmission_str.trim_end().chars() {
            let nibble: u8 = hexadecimal_char
                .to_digit(16_u32)
                .ok_or(PacketDecodeError::InvalidHexadecimalChar(hexadecimal_char))?
                as u8;

            bits.extend_from_bitslice(&nibble.view_bits::<Msb0>()[4_usize..]);
        }

        let mut cursor: BitCursor = BitCursor { bits: &bits };

        Ok(Self(Packet::decode(&mut cursor)?))
    }
}

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day16.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match Solution::try_from(input) {
                    Ok(solution) => {
                        println!("solution.version_sum() == {}", solution.version_sum());
                        println!("solution.value() == {}", solution.value());
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
    use super::*;

    fn literal(version: u8, value: u64) -> Packet {
        Packet {
            version,
            payload: PacketPayload::Literal(value),
        }
    }

    #[test]
    fn test_decode_literal() {
        assert_eq!(
            Solution::try_from("D2FE28"),
            Ok(Solution(literal(6_u8, 2021_u64)))
        );
    }

    #[test]
    fn test_decode_operator_with_total_bit_len() {
        assert_eq!(
            Solution::try_from("38006F45291200"),
            Ok(Solution(Packet {
                version: 1_u8,
                payload: PacketPayload::Operator {
                    operator: Operator::LessThan,
                    packets: vec![literal(6_u8, 10_u64), literal(2_u8, 20_u64)],
                },
            }))
        );
    }

    #[test]
    fn test_decode_operator_with_packet_count() {
        assert_eq!(
            Solution::try_from("EE00D40C823060"),
            Ok(Solution(Packet {
                version: 7_u8,
                payload: PacketPayload::Operator {
                    operator: Operator::Maximum,
                    packets: vec![
                        literal(2_u8, 1_u64),
                        literal(4_u8, 2_u64),
                        literal(1_u8, 3_u64),
                    ],
                },
            }))
        );
    }

    #[test]
    fn test_decode_error() {
        assert_eq!(
            Solution::try_from("XYZ"),
            Err(PacketDecodeError::InvalidHexadecimalChar('X'))
        );
        assert_eq!(
            Solution::try_from("D2"),
            Err(PacketDecodeError::UnexpectedEndOfBits)
        );

        // 17 nibble groups, the first one nonzero: the value no longer fits a `u64`
        assert_eq!(
            Solution::try_from("12318C6318C6318C6318C400"),
            Err(PacketDecodeError::LiteralOverflow)
        );
    }

    #[test]
    fn test_version_sum() {
        macro_rules! test_version_sums {
            ($( ($transmission_str:expr, $version_sum:expr), )*) => {
                $( assert_eq!(
                    Solution::try_from($transmission_str).unwrap().version_sum(),
                    $version_sum
                ); )*
            };
        }

        test_version_sums![
            ("8A004A801A8002F478", 16_u32),
            ("620080001611562C8802118E34", 12_u32),
            ("C0015000016115A2E08F0", 23_u32),
            ("A0016C880162017C3686B18A3D4780", 31_u32),
        ];
    }

    #[test]
    fn test_value() {
        macro_rules! test_values {
            ($( ($transmission_str:expr, $value:expr), )*) => {
                $( assert_eq!(
                    Solution::try_from($transmission_str).unwrap().value(),
                    $value
                ); )*
            };
        }

        test_values![
            ("C200B40A82", 3_u64),
            ("04005AC33890", 54_u64),
            ("880086C3E88112", 7_u64),
            ("CE00C43D881120", 9_u64),
            ("D8005AC2A8F0", 1_u64),
            ("F600BC2D8F", 0_u64),
            ("9C005AC2F8F0", 0_u64),
            ("9C0141080250320F1802104A08", 1_u64),
        ];
    }
}
