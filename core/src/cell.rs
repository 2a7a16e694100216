/// Count reported for coordinates outside the board.
pub const INVALID_CELL: i8 = -2;

/// Count reported for a cell holding a mine, also the count of a cell not counted yet.
pub const MINE_CELL: i8 = -1;

/// One square of the minesweeper board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    has_mine: bool,
    visible: bool,
    flagged: bool,
    neighbor_count: i8,
}

impl Cell {
    pub const fn new() -> Self {
        Self {
            has_mine: false,
            visible: false,
            flagged: false,
            neighbor_count: MINE_CELL,
        }
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn set_mine(&mut self) {
        self.has_mine = true;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self) {
        self.visible = true;
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub const fn count(&self) -> i8 {
        self.neighbor_count
    }

    pub fn set_count(&mut self, count: i8) {
        self.neighbor_count = count;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
