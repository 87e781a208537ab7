use crate::types::{Cell, Player};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw bitboards. Intended for scenario setup;
    /// overlapping masks are a caller bug.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "overlapping bitboards");
        Self { black, white }
    }

    /// Returns the flip mask for placing `player` at `pos`.
    /// 0 when the square is occupied, out of range, or flips nothing.
    pub fn flips_for(&self, pos: usize, player: Player) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let (me, opp) = self.sides(player);
        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;
            let mut has_opponent = false;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    has_opponent = true;
                    line |= square;
                } else if (me & square) != 0 {
                    if has_opponent {
                        flips |= line;
                    }
                    break;
                } else {
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }

    /// Returns the legal move mask for `player`: every empty square whose
    /// flip mask is non-empty.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let occupied = self.black | self.white;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if self.flips_for(pos, player) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Places `player`'s disc at `pos` and overwrites every square in
    /// `flips` with `player`'s color.
    ///
    /// Does not validate legality. The commit protocol is the sole
    /// authority that `flips` was computed from this board state.
    pub fn apply(&mut self, pos: usize, player: Player, flips: u64) {
        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// True iff no empty squares remain.
    pub fn is_full(&self) -> bool {
        (self.black | self.white) == u64::MAX
    }

    pub fn cell_at(&self, pos: usize) -> Cell {
        let square = bit(pos);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell_at(pos).code();
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Expands a bit mask into ascending board indices.
pub fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(2, 3)) | bit(idx(3, 2)) | bit(idx(4, 5)) | bit(idx(5, 4)); // d3,c4,f5,e6

        assert_eq!(board.legal_moves(Player::Black), expected);
    }

    #[test]
    fn t02_each_initial_move_flips_exactly_one_disc() {
        let board = Board::new();

        for pos in bitmask_to_indices(board.legal_moves(Player::Black)) {
            let flips = board.flips_for(pos as usize, Player::Black);
            assert_eq!(flips.count_ones(), 1, "pos {pos}");
        }
    }

    #[test]
    fn apply_flips_discs_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.flips_for(idx(2, 3), Player::Black); // d3
        assert_eq!(flips, bit(idx(3, 3))); // d4

        board.apply(idx(2, 3), Player::Black, flips);

        assert_eq!(board.count(), (4, 1));

        let cells = board.to_array();
        assert_eq!(cells[idx(2, 3)], 1);
        assert_eq!(cells[idx(3, 3)], 1);
        assert_eq!(cells[idx(3, 4)], 1);
        assert_eq!(cells[idx(4, 3)], 1);
        assert_eq!(cells[idx(4, 4)], 2);
    }

    #[test]
    fn apply_adds_exactly_one_disc_to_the_total() {
        let mut board = Board::new();
        let (b0, w0) = board.count();

        let flips = board.flips_for(idx(3, 2), Player::Black);
        board.apply(idx(3, 2), Player::Black, flips);
        let (b1, w1) = board.count();

        assert_eq!(b1 + w1, b0 + w0 + 1);
    }

    #[test]
    fn occupied_and_flipless_squares_yield_zero_flips() {
        let board = Board::new();

        assert_eq!(board.flips_for(idx(3, 3), Player::Black), 0); // occupied
        assert_eq!(board.flips_for(idx(0, 0), Player::Black), 0); // empty, no run
        assert_eq!(board.flips_for(NUM_SQUARES, Player::Black), 0); // out of range
    }

    #[test]
    fn run_reaching_edge_or_empty_square_never_flips() {
        // Row 0: black at a1, white run b1..h1 reaches the edge unterminated.
        let edge = Board::from_bitboards(bit(idx(0, 0)), 0b1111_1110);
        assert_eq!(edge.legal_moves(Player::Black), 0);

        // Row 0: white at b1 then an empty square before any black disc.
        let gap = Board::from_bitboards(bit(idx(0, 3)), bit(idx(0, 1)));
        assert_eq!(gap.flips_for(idx(0, 0), Player::Black), 0);
    }

    #[test]
    fn every_legal_move_is_empty_and_every_other_empty_square_flips_nothing() {
        let mut board = Board::new();
        // Walk a few plies to reach a non-trivial position.
        let mut player = Player::Black;
        for _ in 0..6 {
            let legal = board.legal_moves(player);
            if legal == 0 {
                break;
            }
            let pos = legal.trailing_zeros() as usize;
            let flips = board.flips_for(pos, player);
            board.apply(pos, player, flips);
            player = player.opponent();
        }

        let legal = board.legal_moves(player);
        for pos in 0..NUM_SQUARES {
            let flips = board.flips_for(pos, player);
            if (legal & bit(pos)) != 0 {
                assert_eq!(board.cell_at(pos), Cell::Empty);
                assert!(flips != 0);
            } else {
                assert_eq!(flips, 0);
            }
        }
    }

    #[test]
    fn full_board_is_detected() {
        let board = Board::from_bitboards(u64::MAX >> 32, u64::MAX << 32);
        assert!(board.is_full());
        assert!(!Board::new().is_full());
        assert_eq!(board.count(), (32, 32));
    }
}
