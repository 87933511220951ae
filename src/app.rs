//! # Application
//!
//! The play screen: the state of the front end and its rendering. The player
//! moves a cursor around the flower, picks tiles to build a word, and submits
//! it for a verdict. All game rules live in the [`Round`]; this module only
//! translates keys into round actions and draws the result.

use std::{
	fmt::{self, Display, Formatter},
	io,
	time::Duration
};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	text::Line,
	widgets::{Block, BorderType, Borders, List, Paragraph, Widget},
	Frame
};
use wordbloom::{
	round::{Found, Rejection, Round},
	selection::{Pick, PickRejection},
	tile::{Tile, Tier, Topology, INNER_COUNT, OUTER_COUNT, TILE_COUNT}
};

use crate::tui::Tui;

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// Whether the application is running.
	state: ExecutionState,

	/// The play session.
	round: Round,

	/// The tile under the cursor.
	cursor: Tile,

	/// The outcome of the most recent action, if worth reporting.
	notice: Option<Notice>
}

// Public interface.
impl App
{
	/// Create a new application state.
	///
	/// # Arguments
	///
	/// * `round` - The play session.
	///
	/// # Returns
	///
	/// The new application state, with the cursor on the center tile.
	#[inline]
	pub fn new(round: Round) -> Self
	{
		Self {
			state: ExecutionState::Playing,
			round,
			cursor: Tile::Center,
			notice: None
		}
	}

	/// Run the application until the player exits.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The words found, in order of discovery.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Vec<String>>
	{
		while self.is_running()
		{
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		match self.state
		{
			ExecutionState::Exiting { found } => Ok(found),
			ExecutionState::Playing => Ok(vec![])
		}
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		matches!(self.state, ExecutionState::Playing)
	}
}

// Private implementation details.
impl App
{
	/// Move the cursor around its ring, wrapping at the ends. The center tile
	/// has nowhere to go.
	///
	/// # Arguments
	///
	/// * `delta` - The number of places to move; negative is
	///   counterclockwise.
	fn move_around(&mut self, delta: isize)
	{
		let step = |index: usize, count: usize|
			(index as isize + delta).rem_euclid(count as isize) as usize;
		self.cursor = match self.cursor
		{
			Tile::Center => Tile::Center,
			Tile::Inner(i) =>
				Tile::inner(step(i.get(), INNER_COUNT)).unwrap_or(self.cursor),
			Tile::Outer(o) =>
				Tile::outer(step(o.get(), OUTER_COUNT)).unwrap_or(self.cursor)
		};
	}

	/// Move the cursor one ring inward: from an outer tile to its parent, and
	/// from an inner tile to the center.
	fn move_inward(&mut self)
	{
		self.cursor = match self.cursor
		{
			Tile::Center | Tile::Inner(_) => Tile::Center,
			Tile::Outer(o) => Tile::inner(Topology::STANDARD.parent(o.get()))
				.unwrap_or(self.cursor)
		};
	}

	/// Move the cursor one ring outward: from the center to the first inner
	/// tile, and from an inner tile to an outer tile seated beneath it.
	fn move_outward(&mut self)
	{
		self.cursor = match self.cursor
		{
			Tile::Center => Tile::inner(0).unwrap_or(self.cursor),
			Tile::Inner(i) => Tile::outer(
				(i.get() * OUTER_COUNT / INNER_COUNT) % OUTER_COUNT
			).unwrap_or(self.cursor),
			Tile::Outer(_) => self.cursor
		};
	}

	/// Move the cursor through the tiles in index order, wrapping at the
	/// ends. This supports tabbing through the flower.
	///
	/// # Arguments
	///
	/// * `delta` - The change in tile index.
	fn move_index(&mut self, delta: isize)
	{
		let index = (self.cursor.index() as isize + delta)
			.rem_euclid(TILE_COUNT as isize) as usize;
		self.cursor = Tile::from_index(index).unwrap_or(self.cursor);
	}

	/// Pick the tile under the cursor.
	fn pick_cursor(&mut self)
	{
		self.pick(self.cursor);
	}

	/// Pick a tile that carries the given letter. The tile under the cursor
	/// is preferred, then any tile the selection would accept. If none would
	/// be accepted, the first such tile is offered anyway so that the player
	/// learns why.
	///
	/// # Arguments
	///
	/// * `letter` - The letter.
	fn pick_letter(&mut self, letter: char)
	{
		let letter = letter.to_ascii_uppercase();
		let arrangement = *self.round.arrangement();
		let selection = self.round.selection();
		let candidates = arrangement.tiles_with(letter).collect::<Vec<_>>();
		let tile =
			if candidates.contains(&self.cursor)
				&& selection.check(self.cursor).is_ok()
			{
				Some(self.cursor)
			}
			else
			{
				candidates.iter()
					.copied()
					.find(|&t| selection.check(t).is_ok())
					.or_else(|| candidates.first().copied())
			};
		match tile
		{
			Some(tile) => self.pick(tile),
			None => self.notice = Some(Notice::Absent(letter))
		}
	}

	/// Offer a tile to the round. An accepted tile takes the cursor with it.
	///
	/// # Arguments
	///
	/// * `tile` - The tile.
	fn pick(&mut self, tile: Tile)
	{
		match self.round.pick(tile)
		{
			Pick::Accepted =>
			{
				self.cursor = tile;
				self.notice = None;
			},
			Pick::Rejected(reason) =>
				self.notice = Some(Notice::Refused(tile, reason))
		}
	}

	/// Submit the selection, unless it is empty.
	fn submit(&mut self)
	{
		if self.round.selection().is_empty()
		{
			return
		}
		let word = self.round.selection().word().to_string();
		self.notice = Some(match self.round.submit()
		{
			Ok(found) => Notice::Accepted(found),
			Err(rejection) => Notice::Rejected(word, rejection)
		});
	}

	/// Abandon the selection.
	fn cancel(&mut self)
	{
		self.round.cancel();
		self.notice = None;
	}

	/// Render the application frame.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.area());
	}

	/// Render the play screen.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_playing(&self, area: Rect, buf: &mut Buffer)
	{
		// Split the screen into two parts: the flower and the found words.
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(100), Constraint::Min(24)])
			.split(area);
		// The flower comprises three rows of tiles, then the word and the
		// latest notice.
		let board = Layout::default()
			.direction(Direction::Vertical)
			.margin(2)
			.constraints([
				Constraint::Ratio(1, 3),
				Constraint::Length(3),
				Constraint::Length(3),
				Constraint::Length(3),
				Constraint::Length(3),
				Constraint::Length(2),
				Constraint::Ratio(1, 3)
			])
			.split(outer[0]);
		Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title_top(Line::from("Flower").centered())
			.title_top(Line::from("⎋ – exit".yellow().bold()).left_aligned())
			.title_top(Line::from("↵ – submit".green().bold()).right_aligned())
			.title_bottom(
				Line::from(
					"\
						←→ - around \
						↑↓ - in/out \
						⇥ - next \
						␣ - pick \
						A-Z - pick letter \
						⌫ - cancel\
					".cyan()
				).centered()
			)
			.render(outer[0], buf);
		self.render_ring(&[Tile::Center], board[1], buf);
		let inner = (0 .. INNER_COUNT).filter_map(Tile::inner).collect::<Vec<_>>();
		self.render_ring(&inner, board[2], buf);
		let rim = (0 .. OUTER_COUNT).filter_map(Tile::outer).collect::<Vec<_>>();
		self.render_ring(&rim, board[3], buf);
		self.render_word(board[4], buf);
		self.render_notice(board[5], buf);
		self.render_found(outer[1], buf);
	}

	/// Render one row of tiles, centered, each cell showing its letter and,
	/// if picked, its position within the selection.
	///
	/// # Arguments
	///
	/// * `tiles` - The tiles of the row.
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_ring(&self, tiles: &[Tile], area: Rect, buf: &mut Buffer)
	{
		let width = 7u16;
		let used = (width * tiles.len() as u16).min(area.width);
		let row = Rect {
			x: area.x + (area.width - used) / 2,
			width: used,
			..area
		};
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints(tiles.iter().map(|_| Constraint::Length(width)))
			.split(row);
		let picked = self.round.selection().tiles();
		for (tile, column) in tiles.iter().zip(columns.iter())
		{
			let letter = self.round.arrangement().letter_at(*tile);
			let order = picked.iter().rposition(|t| t == tile);
			let label = match order
			{
				Some(order) => format!("{}{}", letter, order + 1),
				None => letter.to_string()
			};
			let style =
				if *tile == self.cursor
				{
					Style::default().fg(Color::Black).bg(Color::Cyan)
				}
				else if order.is_some()
				{
					Style::default().fg(Color::Black).bg(Color::Green)
				}
				else
				{
					Style::default()
				};
			let border_color = match tile.tier()
			{
				Tier::Center => Color::Yellow,
				Tier::Inner => Color::White,
				Tier::Outer => Color::Gray
			};
			let block = Block::new()
				.border_type(BorderType::Rounded)
				.borders(Borders::ALL)
				.border_style(Style::default().fg(border_color));
			Paragraph::new(label)
				.block(block)
				.alignment(Alignment::Center)
				.style(style)
				.render(*column, buf);
		}
	}

	/// Render the word under construction. A word that no dictionary word
	/// begins with is shown in red.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_word(&self, area: Rect, buf: &mut Buffer)
	{
		let color =
			if self.round.is_promising() { Color::White }
			else { Color::Red };
		Paragraph::new(self.round.selection().word().to_string())
			.block(
				Block::new()
					.borders(Borders::ALL)
					.title_top(Line::from("Word").centered())
			)
			.alignment(Alignment::Center)
			.style(Style::default().fg(color).bold())
			.render(area, buf);
	}

	/// Render the outcome of the most recent action.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_notice(&self, area: Rect, buf: &mut Buffer)
	{
		let line = match &self.notice
		{
			None if self.round.is_complete() =>
				Line::from("Every word found!".green().bold()),
			None => Line::default(),
			Some(notice @ Notice::Accepted(_)) =>
				Line::from(notice.to_string().green()),
			Some(notice) => Line::from(notice.to_string().red())
		};
		Paragraph::new(line.centered()).render(area, buf);
	}

	/// Render the words found so far.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_found(&self, area: Rect, buf: &mut Buffer)
	{
		let title = format!(
			"Found ({}/{})",
			self.round.found().len(),
			self.round.formable_count()
		);
		let list = List::new(self.round.found().iter().map(String::as_str))
			.block(
				Block::default()
					.borders(Borders::ALL)
					.title_top(Line::from(title).centered())
			)
			.style(Style::default().fg(Color::White));
		Widget::render(list, area, buf);
	}

	/// Process events. Block for a short while only, so that the screen keeps
	/// up with resizes.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(Duration::from_millis(50))?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event:
	///
	/// * Escape - Exit the application.
	/// * Left/Right - Move the cursor around its ring.
	/// * Up/Down - Move the cursor inward or outward.
	/// * Tab/BackTab - Move the cursor to the next or previous tile.
	/// * Space - Pick the tile under the cursor.
	/// * A-Z - Pick a tile with the corresponding letter.
	/// * Enter - Submit the word.
	/// * Backspace - Abandon the word.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		if !self.is_running()
		{
			return
		}
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Left => self.move_around(-1),
			KeyCode::Right => self.move_around(1),
			KeyCode::Up => self.move_inward(),
			KeyCode::Down => self.move_outward(),
			KeyCode::BackTab => self.move_index(-1),
			KeyCode::Tab => self.move_index(1),
			KeyCode::Char(' ') => self.pick_cursor(),
			KeyCode::Char(c) if c.is_ascii_alphabetic() => self.pick_letter(c),
			KeyCode::Enter => self.submit(),
			KeyCode::Backspace => self.cancel(),
			_ => {}
		}
	}

	/// Mark the application for exit. The application will exit after the
	/// next iteration of the main loop.
	fn exit(&mut self)
	{
		self.state = ExecutionState::Exiting {
			found: self.round.found().to_vec()
		};
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Playing => self.render_playing(area, buf),
			ExecutionState::Exiting { .. } => {}
		}
	}
}

/// The execution state of the application.
#[derive(Clone, Debug)]
enum ExecutionState
{
	/// The player is building and submitting words.
	Playing,

	/// The application is exiting.
	Exiting {
		/// The words found, in order of discovery.
		found: Vec<String>
	}
}

/// The outcome of the most recent action.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice
{
	/// A word was accepted.
	Accepted(Found),

	/// A word was rejected.
	Rejected(String, Rejection),

	/// A tile could not be picked.
	Refused(Tile, PickRejection),

	/// No tile carries the letter.
	Absent(char)
}

impl Display for Notice
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Accepted(found) =>
				write!(f, "{}: {}", found.word, found.path),
			Self::Rejected(word, rejection) =>
				write!(f, "{}: {}", word, rejection),
			Self::Refused(tile, reason) =>
				write!(f, "{}: {}", tile, reason),
			Self::Absent(letter) =>
				write!(f, "No {} on the flower", letter)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::rc::Rc;

	use wordbloom::{arrangement::Arrangement, dictionary::DictionaryIndex};

	use super::*;

	/// An application over the sample arrangement with a tiny dictionary.
	fn sample() -> App
	{
		let dictionary = DictionaryIndex::from_words(["road", "rue", "ram"]);
		let arrangement =
			"R/UETOAD/FIKTYNMDLCWS".parse::<Arrangement>().unwrap();
		App::new(Round::new(Rc::new(dictionary), arrangement))
	}

	/// Ensure that the application exits when the escape key is pressed.
	#[test]
	fn test_handle_exit()
	{
		let mut app = sample();
		assert!(app.is_running());
		app.process_key_event(KeyCode::Esc.into());
		assert!(!app.is_running());
	}

	/// Ensure that the cursor moves around and between the rings.
	#[test]
	fn test_handle_arrows()
	{
		let inner = |i| Tile::inner(i).unwrap();
		let outer = |i| Tile::outer(i).unwrap();
		let mut app = sample();
		assert_eq!(app.cursor, Tile::Center);
		app.process_key_event(KeyCode::Left.into());
		assert_eq!(app.cursor, Tile::Center);
		app.process_key_event(KeyCode::Up.into());
		assert_eq!(app.cursor, Tile::Center);
		app.process_key_event(KeyCode::Down.into());
		assert_eq!(app.cursor, inner(0));
		app.process_key_event(KeyCode::Left.into());
		assert_eq!(app.cursor, inner(5));
		app.process_key_event(KeyCode::Right.into());
		app.process_key_event(KeyCode::Right.into());
		assert_eq!(app.cursor, inner(1));
		app.process_key_event(KeyCode::Down.into());
		assert_eq!(app.cursor, outer(2));
		app.process_key_event(KeyCode::Down.into());
		assert_eq!(app.cursor, outer(2));
		app.process_key_event(KeyCode::Right.into());
		assert_eq!(app.cursor, outer(3));
		app.process_key_event(KeyCode::Up.into());
		assert_eq!(app.cursor, inner(2));
		app.cursor = outer(11);
		app.process_key_event(KeyCode::Right.into());
		assert_eq!(app.cursor, outer(0));
		app.process_key_event(KeyCode::Up.into());
		assert_eq!(app.cursor, inner(0));
		app.process_key_event(KeyCode::Up.into());
		assert_eq!(app.cursor, Tile::Center);
	}

	/// Ensure that tabbing visits every tile in index order.
	#[test]
	fn test_handle_tab()
	{
		let mut app = sample();
		for index in 1 ..= TILE_COUNT
		{
			app.process_key_event(KeyCode::Tab.into());
			assert_eq!(app.cursor.index(), index % TILE_COUNT);
		}
		app.process_key_event(KeyCode::BackTab.into());
		assert_eq!(app.cursor, Tile::from_index(TILE_COUNT - 1).unwrap());
	}

	/// Ensure that typed letters pick tiles and that a submitted word is
	/// judged and recorded.
	#[test]
	fn test_handle_word()
	{
		let mut app = sample();
		for c in ['r', 'u', 'e']
		{
			app.process_key_event(KeyCode::Char(c).into());
		}
		assert_eq!(app.round.selection().word(), "RUE");
		assert_eq!(app.cursor, Tile::inner(1).unwrap());
		app.process_key_event(KeyCode::Enter.into());
		assert!(matches!(app.notice, Some(Notice::Accepted(_))));
		assert!(app.round.selection().is_empty());

		app.process_key_event(KeyCode::Char('r').into());
		app.process_key_event(KeyCode::Char('u').into());
		app.process_key_event(KeyCode::Char('e').into());
		app.process_key_event(KeyCode::Enter.into());
		assert_eq!(
			app.notice,
			Some(Notice::Rejected("RUE".to_string(), Rejection::Duplicate))
		);

		app.process_key_event(KeyCode::Char('q').into());
		assert_eq!(app.notice, Some(Notice::Absent('Q')));

		app.process_key_event(KeyCode::Char('r').into());
		app.process_key_event(KeyCode::Char('r').into());
		assert_eq!(
			app.notice,
			Some(Notice::Refused(Tile::Center, PickRejection::SameAsLast))
		);
		app.process_key_event(KeyCode::Backspace.into());
		assert!(app.round.selection().is_empty());
		assert_eq!(app.notice, None);

		app.process_key_event(KeyCode::Esc.into());
		match app.state
		{
			ExecutionState::Exiting { ref found } =>
				assert_eq!(found, &vec!["RUE".to_string()]),
			ExecutionState::Playing => panic!("still playing")
		}
	}

	/// Ensure that the space bar picks the tile under the cursor.
	#[test]
	fn test_handle_space()
	{
		let mut app = sample();
		app.process_key_event(KeyCode::Char(' ').into());
		app.process_key_event(KeyCode::Down.into());
		app.process_key_event(KeyCode::Char(' ').into());
		assert_eq!(app.round.selection().word(), "RU");
		app.cursor = Tile::outer(6).unwrap();
		app.process_key_event(KeyCode::Char(' ').into());
		assert_eq!(
			app.notice,
			Some(Notice::Refused(
				Tile::outer(6).unwrap(),
				PickRejection::NotAdjacent
			))
		);
		assert_eq!(app.round.selection().word(), "RU");
	}
}
