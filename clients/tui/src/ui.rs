use blackjack::io::{Status, TableView};
use blackjack::{Card, CountStatistics, RoundOutcome, CARDS_PER_DECK};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Count shown with an explicit plus sign when positive
pub fn signed(n: i32) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

pub fn draw(f: &mut Frame, view: &TableView, status: &Status, logs: &[String], log_visible: bool) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Length(4), // Scoreboard
                Constraint::Min(10),   // Table
                Constraint::Length(3), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let num_decks = view.total_cards / CARDS_PER_DECK;
    let title = Paragraph::new(format!(
        "Terminal Blackjack | {num_decks} deck{} | [L] toggle log",
        if num_decks == 1 { "" } else { "s" }
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    let scoreboard = Paragraph::new(scoreboard_lines(view))
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM));
    f.render_widget(scoreboard, main_chunks[1]);

    let (table_area, log_area) = if log_visible {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(main_chunks[2]);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (main_chunks[2], None)
    };

    let table_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Dealer
                Constraint::Length(3), // Player
                Constraint::Min(3),    // Result / shuffle
            ]
            .as_ref(),
        )
        .split(table_area);

    let hide_hole = view.hide_dealer_hole();
    let dealer = Paragraph::new(hand_line(&view.dealer_hand.cards, hide_hole))
        .block(Block::default().borders(Borders::ALL).title(" Dealer "));
    f.render_widget(dealer, table_rows[0]);

    let player = Paragraph::new(hand_line(&view.player_hand.cards, false))
        .block(Block::default().borders(Borders::ALL).title(" Player "));
    f.render_widget(player, table_rows[1]);

    let result_lines = match status {
        Status::Shuffling {
            manual,
            step,
            total,
        } => shuffle_lines(*manual, *step, *total),
        _ => view
            .last_result
            .map(|outcome| vec![Line::from(""), result_line(outcome)])
            .unwrap_or_default(),
    };
    let result = Paragraph::new(result_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(result, table_rows[2]);

    if let Some(area) = log_area {
        let visible = area.height.saturating_sub(2) as usize;
        let start = logs.len().saturating_sub(visible);
        let log_lines: Vec<Line> = logs[start..]
            .iter()
            .map(|msg| Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Gray))))
            .collect();
        let log = Paragraph::new(log_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Log "));
        f.render_widget(log, area);
    }

    let status_bar = Paragraph::new(status_line(status))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[3]);
}

fn scoreboard_lines(view: &TableView) -> Vec<Line<'static>> {
    let stats: &CountStatistics = &view.stats;
    let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

    vec![
        Line::from(vec![
            Span::styled(
                format!(" Cards: {}/{}", view.remaining_cards, view.total_cards),
                Style::default().fg(Color::Yellow),
            ),
            sep(),
            Span::styled(format!("W: {}", stats.games_won), Style::default().fg(Color::Green)),
            sep(),
            Span::styled(format!("L: {}", stats.games_lost), Style::default().fg(Color::Red)),
            sep(),
            Span::styled(format!("T: {}", stats.games_tied), Style::default().fg(Color::Blue)),
            sep(),
            Span::styled(
                format!("Win Rate: {}%", stats.win_rate()),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Hi-Lo: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("R {}", signed(stats.running_count))),
            Span::styled(" / ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("T {}", signed(view.true_count))),
            sep(),
            Span::styled(
                format!("Decks: {:.1}", view.decks_remaining),
                Style::default().fg(Color::Yellow),
            ),
            sep(),
            Span::styled(format!("BJ: {}", stats.blackjacks), Style::default().fg(Color::Yellow)),
            sep(),
            Span::styled(
                format!("Busts: P:{} D:{}", stats.busts, stats.dealer_busts),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ]
}

fn card_span(card: &Card) -> Span<'static> {
    let bg = if card.is_red() {
        Color::LightRed
    } else {
        Color::DarkGray
    };
    Span::styled(
        card.to_display(),
        Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn hand_line(cards: &[Card], hide_hole: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, card) in cards.iter().enumerate() {
        if hide_hole && idx == 0 {
            spans.push(Span::styled("??", Style::default().fg(Color::White).bg(Color::Gray)));
        } else {
            spans.push(card_span(card));
        }
        spans.push(Span::raw(" "));
    }

    if !cards.is_empty() && !hide_hole {
        spans.push(Span::styled(
            format!("({})", blackjack::calculate_hand_value(cards)),
            Style::default().fg(Color::Gray),
        ));
    }

    Line::from(spans)
}

fn result_line(outcome: RoundOutcome) -> Line<'static> {
    let (text, color) = match outcome {
        RoundOutcome::PlayerBlackjack => ("★  BLACKJACK! YOU WIN! ★", Color::Green),
        RoundOutcome::BlackjackPush => ("⚖  PUSH - Both have Blackjack!", Color::Blue),
        RoundOutcome::DealerBlackjack => ("✖  Dealer Blackjack - You Lose", Color::Red),
        RoundOutcome::PlayerBust => ("✖  BUST! YOU LOSE", Color::Red),
        RoundOutcome::DealerBust => ("✓  DEALER BUSTS! YOU WIN!", Color::Green),
        RoundOutcome::PlayerWins => ("✓  YOU WIN!", Color::Green),
        RoundOutcome::DealerWins => ("✖  YOU LOSE", Color::Red),
        RoundOutcome::Push => ("⚖  PUSH (Tie)", Color::Blue),
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Progress bar that fills outward from the centre, red then yellow then green
fn shuffle_lines(manual: bool, step: u32, total: u32) -> Vec<Line<'static>> {
    let heading = if manual {
        Line::from(vec![
            Span::styled("♠", Style::default().fg(Color::Yellow)),
            Span::styled("♥", Style::default().fg(Color::Red)),
            Span::styled(
                "  Manual shuffle in progress...  ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled("♦", Style::default().fg(Color::Red)),
            Span::styled("♣", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(vec![
            Span::styled("♥", Style::default().fg(Color::Red)),
            Span::styled("♠", Style::default().fg(Color::Gray)),
            Span::styled(
                "  Shuffling deck - 25% cards remaining  ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled("♦", Style::default().fg(Color::Red)),
            Span::styled("♣", Style::default().fg(Color::Gray)),
        ])
    };

    let filled = step.min(total);
    let empty = total - filled;
    let left = empty / 2;
    let bar = format!(
        "{}{}{}",
        " ".repeat(left as usize),
        "█".repeat(filled as usize),
        " ".repeat((empty - left) as usize)
    );
    let color = if filled * 3 < total {
        Color::Red
    } else if filled * 3 < total * 2 {
        Color::Yellow
    } else {
        Color::Green
    };

    vec![heading, Line::from(Span::styled(bar, Style::default().fg(color)))]
}

fn status_line(status: &Status) -> Line<'static> {
    let (text, style) = match status {
        Status::Idle | Status::Shuffling { .. } => (String::new(), Style::default()),
        Status::AwaitingAction => (
            "Press (H) to Hit, (S) to Stand, or (Q) to Quit".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Status::PlayerDrew(card) => (format!("Drew: {card}"), Style::default().fg(Color::Cyan)),
        Status::PlayerBusts => (
            "PLAYER BUSTS!".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Status::PlayerHas21 => (
            "PLAYER HAS 21!".to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Status::ManualShuffleRequested => (
            "Secret shuffle activated!".to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Status::ShuffleComplete => (
            "Deck reshuffled! Continue playing...".to_string(),
            Style::default().fg(Color::Green),
        ),
        Status::DealerTurn => (
            "DEALER'S TURN".to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Status::DealerDraws(card) => {
            (format!("Dealer draws: {card}"), Style::default().fg(Color::Cyan))
        }
        Status::DealerBusts => (
            "DEALER BUSTS!".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Status::DealerStands(value) => (
            format!("Dealer stands at {value}"),
            Style::default().fg(Color::Yellow),
        ),
        Status::PlayAgainPrompt => (
            "Press (Y/H) to play again or (Q) to quit".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Status::InvalidReplayChoice => (
            "Invalid choice. Press (Y) or (H) to play again or (Q) to quit".to_string(),
            Style::default().fg(Color::Red),
        ),
    };
    Line::from(Span::styled(text, style))
}
