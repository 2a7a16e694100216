use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Valid transitions:
/// - Init -> InGame
/// - Init -> Exploded
/// - Init -> Solved
/// - InGame -> Exploded
/// - InGame -> Solved
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Init,
    InGame,
    Exploded,
    Solved,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exploded | Self::Solved)
    }

    pub const fn as_str(self) -> &'static str {
        use GameStatus::*;
        match self {
            Init => "INIT",
            InGame => "IN_GAME",
            Exploded => "EXPLODED",
            Solved => "SOLVED",
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Init
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of clicking a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Out of the board, flagged, already open, or the game is over
    Rejected,
    /// The cell held a mine
    Mine,
    /// The cell was opened, with its neighbor mine count
    Revealed(u8),
}

impl ClickOutcome {
    /// Integer form: `-2` rejected, `-1` mine, otherwise the neighbor count.
    pub const fn code(self) -> i8 {
        match self {
            Self::Rejected => INVALID_CELL,
            Self::Mine => MINE_CELL,
            Self::Revealed(count) => count as i8,
        }
    }
}

/// Builds a `rows x cols` board of default cells.
pub fn gen_empty_board(rows: usize, cols: usize) -> Result<DynGrid<Cell>> {
    if rows == 0 || cols == 0 {
        return Err(GameError::ConfigurationError(
            "board needs at least one row and one column",
        ));
    }
    DynGrid::filled(rows, cols, |_, _| Cell::default())
}

#[derive(Clone, Debug, PartialEq)]
pub struct MineEngine {
    board: DynGrid<Cell>,
    row_count: usize,
    col_count: usize,
    mine_total: usize,
    clicked_count: usize,
    flagged_count: isize,
    status: GameStatus,
}

impl MineEngine {
    /// Starts a game on one of the named levels.
    pub fn new(seed: i64, level: Level) -> Result<Self> {
        let config = level.config().ok_or(GameError::ConfigurationError(
            "custom games need rows, columns and mines",
        ))?;
        Self::with_stream(&mut Lcg48::new(seed), config)
    }

    /// Starts a game on a custom board, `level` must be [`Level::Custom`].
    pub fn new_custom(
        seed: i64,
        level: Level,
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    ) -> Result<Self> {
        if level != Level::Custom {
            return Err(GameError::ConfigurationError(
                "only custom games take rows, columns and mines",
            ));
        }
        let config = BoardConfig::new(rows, cols, mines)?;
        Self::with_stream(&mut Lcg48::new(seed), config)
    }

    pub fn with_stream<S: SeedStream + ?Sized>(
        stream: &mut S,
        config: BoardConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rows = usize::from(config.rows);
        let cols = usize::from(config.cols);
        let mut engine = Self {
            board: gen_empty_board(rows, cols)?,
            row_count: rows,
            col_count: cols,
            mine_total: config.mines as usize,
            clicked_count: 0,
            flagged_count: 0,
            status: GameStatus::Init,
        };
        engine.place_mines(stream, config)?;
        engine.cache_counts()?;
        log::debug!("Built {}x{} board with {} mines", rows, cols, engine.mine_total);
        Ok(engine)
    }

    /// Wraps a prepared board, counts and cells are taken as they are.
    pub fn from_board(board: DynGrid<Cell>, mine_count: usize) -> Result<Self> {
        let mut engine = Self {
            board: DynGrid::new(),
            row_count: 0,
            col_count: 0,
            mine_total: 0,
            clicked_count: 0,
            flagged_count: 0,
            status: GameStatus::Init,
        };
        engine.set_board(board, mine_count)?;
        Ok(engine)
    }

    /// Rejection-samples `(row, col)` pairs until every mine has a distinct cell.
    fn place_mines<S: SeedStream + ?Sized>(
        &mut self,
        stream: &mut S,
        config: BoardConfig,
    ) -> Result<()> {
        let mut placed = 0;
        while placed < self.mine_total {
            let row = stream.next_below(u32::from(config.rows)) as usize;
            let col = stream.next_below(u32::from(config.cols)) as usize;

            let cell = self.board.get_mut(row, col)?;
            if cell.has_mine() {
                continue;
            }
            cell.set_mine();
            placed += 1;
            log::trace!("Mine placed at {:?}", (row, col));
        }
        Ok(())
    }

    fn cache_counts(&mut self) -> Result<()> {
        for row in 0..self.row_count {
            for col in 0..self.col_count {
                let count = self.count_neighbor_mines(row, col);
                self.board.get_mut(row, col)?.set_count(count);
            }
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn mine_total(&self) -> usize {
        self.mine_total
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn get_status(&self) -> &'static str {
        self.status.as_str()
    }

    pub fn is_solved(&self) -> bool {
        self.status == GameStatus::Solved
    }

    pub fn is_exploded(&self) -> bool {
        self.status == GameStatus::Exploded
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mine_left(&self) -> isize {
        self.mine_total as isize - self.flagged_count
    }

    pub fn is_flagged(&self, row: usize, col: usize) -> bool {
        self.board.get(row, col).is_ok_and(|cell| cell.is_flagged())
    }

    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        self.board.get(row, col).is_ok_and(|cell| cell.is_visible())
    }

    /// Whether the cell holds a mine, flagged or not.
    pub fn has_mine(&self, row: usize, col: usize) -> bool {
        self.board.get(row, col).is_ok_and(|cell| cell.has_mine())
    }

    /// Cached neighbor count, [`INVALID_CELL`] outside the board.
    pub fn get_count(&self, row: usize, col: usize) -> i8 {
        self.board.get(row, col).map_or(INVALID_CELL, |cell| cell.count())
    }

    pub fn board(&self) -> &DynGrid<Cell> {
        &self.board
    }

    /// Replaces the whole board and starts over from [`GameStatus::Init`].
    pub fn set_board(&mut self, board: DynGrid<Cell>, mine_count: usize) -> Result<()> {
        let cells = board.row_count() * board.col_count();
        if cells == 0 {
            return Err(GameError::InvalidValue("board has no cells"));
        }
        if mine_count > cells {
            return Err(GameError::ConfigurationError("more mines than cells"));
        }

        self.row_count = board.row_count();
        self.col_count = board.col_count();
        self.board = board;
        self.mine_total = mine_count;
        self.status = GameStatus::Init;
        self.clicked_count = 0;
        self.flagged_count = 0;
        log::debug!(
            "Board replaced, {}x{} with {} mines",
            self.row_count,
            self.col_count,
            mine_count
        );
        Ok(())
    }

    /// Mines around `(row, col)`, [`MINE_CELL`] if it holds one itself and
    /// [`INVALID_CELL`] outside the board.
    pub fn count_neighbor_mines(&self, row: usize, col: usize) -> i8 {
        let Ok(cell) = self.board.get(row, col) else {
            return INVALID_CELL;
        };
        if cell.has_mine() {
            return MINE_CELL;
        }
        self.iter_neighbors((row, col))
            .filter(|&(row, col)| self.has_mine(row, col))
            .count() as i8
    }

    /// Opens a cell, flood-filling from it when no mine is around.
    pub fn click_at(&mut self, row: usize, col: usize) -> ClickOutcome {
        if self.status.is_terminal() {
            log::debug!("Click at {:?} ignored, game is {}", (row, col), self.status);
            return ClickOutcome::Rejected;
        }

        let Ok(&cell) = self.board.get(row, col) else {
            return ClickOutcome::Rejected;
        };
        if cell.is_flagged() || cell.is_visible() {
            return ClickOutcome::Rejected;
        }

        if cell.has_mine() {
            self.reveal((row, col));
            self.status = GameStatus::Exploded;
            log::debug!("Mine hit at {:?}", (row, col));
            return ClickOutcome::Mine;
        }

        let count = self.count_neighbor_mines(row, col);
        if count == 0 {
            self.expose_zero_region((row, col));
        } else {
            self.reveal((row, col));
        }

        self.status = if self.clicked_count == self.safe_cells() {
            GameStatus::Solved
        } else {
            GameStatus::InGame
        };
        log::debug!(
            "Opened {:?}, mine count: {}, status: {}",
            (row, col),
            count,
            self.status
        );

        u8::try_from(count).map_or(ClickOutcome::Rejected, ClickOutcome::Revealed)
    }

    /// Opens the connected zero-count region around `start` plus the ring of numbered
    /// cells bordering it. Flags on opened cells are dropped.
    fn expose_zero_region(&mut self, start: Coord2) {
        let mut pending: SmallVec<[Coord2; 32]> = smallvec![start];

        while let Some(coords) = pending.pop() {
            let Ok(&cell) = self.board.get(coords.0, coords.1) else {
                continue;
            };
            if cell.is_visible() || cell.has_mine() {
                continue;
            }

            if cell.is_flagged() {
                self.clear_flag(coords);
            }
            self.reveal(coords);
            log::trace!("Flood opened cell at {:?}", coords);

            // numbered cells are opened but not expanded
            if self.count_neighbor_mines(coords.0, coords.1) == 0 {
                pending.extend(self.iter_neighbors(coords));
            }
        }
    }

    /// Flags a closed cell. Flagging an already flagged cell still reports `true`.
    pub fn flag_at(&mut self, row: usize, col: usize) -> bool {
        let Ok(cell) = self.board.get_mut(row, col) else {
            return false;
        };
        if cell.is_visible() {
            return false;
        }
        if !cell.is_flagged() {
            cell.set_flagged(true);
            self.flagged_count += 1;
        }
        true
    }

    /// Clears a flag, `false` when there was nothing to clear.
    pub fn un_flag_at(&mut self, row: usize, col: usize) -> bool {
        let Ok(cell) = self.board.get(row, col) else {
            return false;
        };
        if !cell.is_flagged() || cell.is_visible() {
            return false;
        }
        self.clear_flag((row, col));
        true
    }

    /// Flags carried in by `set_board` are not counted, so the counter may go negative.
    fn clear_flag(&mut self, (row, col): Coord2) {
        if let Ok(cell) = self.board.get_mut(row, col) {
            cell.set_flagged(false);
            self.flagged_count -= 1;
        }
    }

    fn reveal(&mut self, (row, col): Coord2) {
        if let Ok(cell) = self.board.get_mut(row, col) {
            cell.set_visible();
            self.clicked_count += 1;
        }
    }

    fn safe_cells(&self) -> usize {
        (self.row_count * self.col_count).saturating_sub(self.mine_total)
    }

    fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, (self.board.row_count(), self.board.col_count()))
    }
}
