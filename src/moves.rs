use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;

/// Directions the blank moves in, in order.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Dir>);

impl Moves {
    pub fn new(moves: Vec<Dir>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn add(&mut self, dir: Dir) {
        self.0.push(dir);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Dir> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Dir;
    type IntoIter = ::std::vec::IntoIter<Dir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Dir;
    type IntoIter = ::std::slice::Iter<'a, Dir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for dir in self {
            write!(f, "{}", dir)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_moves() {
        let moves = Moves::new(vec![Dir::Up, Dir::Right, Dir::Down, Dir::Left]);
        assert_eq!(moves.to_string(), "urdl");
        assert_eq!(format!("{:?}", moves), "urdl");
        assert_eq!(Moves::default().to_string(), "");
    }

    #[test]
    fn adding_and_counting() {
        let mut moves = Moves::default();
        assert_eq!(moves.move_cnt(), 0);
        moves.add(Dir::Left);
        moves.add(Dir::Up);
        assert_eq!(moves.move_cnt(), 2);
        assert_eq!(moves, Moves::new(vec![Dir::Left, Dir::Up]));
    }

    #[test]
    fn iterating() {
        let v = vec![Dir::Up, Dir::Right, Dir::Down, Dir::Left];
        let moves = Moves::new(v.clone());

        let mut v2 = Vec::new();
        for &m in &moves {
            v2.push(m);
        }
        for &m in moves.iter() {
            v2.push(m);
        }
        for m in moves {
            v2.push(m);
        }

        assert_eq!(v2.len(), 12);
        for chunk in v2.chunks(4) {
            assert_eq!(chunk, &v[..]);
        }
    }
}
