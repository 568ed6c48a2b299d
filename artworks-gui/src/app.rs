use artworks_core::render::{COLUMN_HEADERS, row_cells};
use artworks_core::{ArticClient, Artwork, ArtworkId, ArtworkTable};
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, checkbox, column, container, horizontal_rule, row, scrollable, text,
    text_input,
};
use iced::{Element, Length, Task};
use std::future::Future;
use std::sync::Arc;

// Relative widths of Title, Artist, Place of Origin, Inscriptions, Date Start, Date End
const COLUMN_PORTIONS: [u16; 6] = [4, 4, 2, 3, 1, 1];
const SELECT_COLUMN_WIDTH: f32 = 64.0;

#[derive(Debug, Clone)]
pub enum Message {
    NextPage,
    PrevPage,
    ToggleRow(ArtworkId, bool),
    ToggleAll(bool),
    TogglePanel,
    RowsToSelectChanged(String),
    SubmitSelectCount,
    // A copy of the table came back from a background fetch
    TableUpdated(Box<ArtworkTable>),
    DismissError,
}

pub struct AppState {
    client: Arc<ArticClient>,
    table: ArtworkTable,
    rows_input: String,
}

impl AppState {
    pub fn new(client: Arc<ArticClient>) -> Self {
        let table = ArtworkTable::new(client.config().page_size);
        Self {
            client,
            table,
            rows_input: String::new(),
        }
    }
}

pub fn initialize(client: Arc<ArticClient>) -> (AppState, Task<Message>) {
    let mut state = AppState::new(client);
    let task = run_on_copy(&mut state, |mut table, client| async move {
        let _ = table.go_to_page(&*client, 1).await;
        table
    });
    (state, task)
}

/// Run `operation` on a copy of the table and swap the result back in when
/// it completes. The live table is marked loading meanwhile, which disables
/// every control, so no edit can be lost by the swap.
fn run_on_copy<F, Fut>(state: &mut AppState, operation: F) -> Task<Message>
where
    F: FnOnce(ArtworkTable, Arc<ArticClient>) -> Fut,
    Fut: Future<Output = ArtworkTable> + Send + 'static,
{
    let table = state.table.clone();
    state.table.set_loading(true);
    Task::perform(operation(table, Arc::clone(&state.client)), |table| {
        Message::TableUpdated(Box::new(table))
    })
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    if state.table.is_loading() && !matches!(message, Message::TableUpdated(_)) {
        log::debug!("Ignoring {:?} while loading", message);
        return Task::none();
    }

    match message {
        Message::NextPage => {
            return run_on_copy(state, |mut table, client| async move {
                let _ = table.next_page(&*client).await;
                table
            });
        }
        Message::PrevPage => {
            return run_on_copy(state, |mut table, client| async move {
                let _ = table.prev_page(&*client).await;
                table
            });
        }
        Message::ToggleRow(id, checked) => {
            if state.table.is_selected(id) != checked {
                state.table.toggle_row(id);
            }
        }
        Message::ToggleAll(_) => {
            state.table.toggle_select_all();
        }
        Message::TogglePanel => {
            state.table.toggle_panel();
        }
        Message::RowsToSelectChanged(input) => {
            let digits: String = input.chars().filter(char::is_ascii_digit).collect();
            state
                .table
                .set_rows_to_select(digits.parse().unwrap_or(0));
            state.rows_input = digits;
        }
        Message::SubmitSelectCount => {
            log::info!("Selecting first {} rows", state.table.rows_to_select());
            return run_on_copy(state, |mut table, client| async move {
                table.submit_rows_to_select(&*client).await;
                table
            });
        }
        Message::TableUpdated(table) => {
            state.table = *table;
        }
        Message::DismissError => {
            state.table.clear_error();
        }
    }

    Task::none()
}

fn header_row(state: &AppState) -> Element<'_, Message> {
    let table = &state.table;
    let loading = table.is_loading();

    let select_all = checkbox("", table.all_selected())
        .on_toggle_maybe((!loading).then_some(Message::ToggleAll as fn(bool) -> Message));
    let panel_toggle = button(if table.panel_open() { "▴" } else { "▾" })
        .on_press_maybe((!loading).then_some(Message::TogglePanel))
        .padding(4);

    let mut cells = row![
        row![select_all, panel_toggle]
            .spacing(4)
            .align_y(Vertical::Center)
            .width(Length::Fixed(SELECT_COLUMN_WIDTH))
    ];
    for (header, portion) in COLUMN_HEADERS.iter().zip(COLUMN_PORTIONS) {
        cells = cells.push(text(*header).size(15).width(Length::FillPortion(portion)));
    }
    cells.spacing(10).align_y(Vertical::Center).into()
}

fn artwork_row<'a>(state: &'a AppState, artwork: &'a Artwork) -> Element<'a, Message> {
    let id = artwork.id;
    let toggle = checkbox("", state.table.is_selected(id)).on_toggle_maybe(
        (!state.table.is_loading()).then_some(move |checked| Message::ToggleRow(id, checked)),
    );

    let mut cells = row![container(toggle).width(Length::Fixed(SELECT_COLUMN_WIDTH))];
    for (cell, portion) in row_cells(artwork).into_iter().zip(COLUMN_PORTIONS) {
        cells = cells.push(text(cell).size(13).width(Length::FillPortion(portion)));
    }
    cells.spacing(10).align_y(Vertical::Center).into()
}

fn selection_panel(state: &AppState) -> Element<'_, Message> {
    let loading = state.table.is_loading();
    container(
        column![
            text("Select Rows").size(16),
            text_input("Number of rows", &state.rows_input)
                .on_input_maybe((!loading).then_some(Message::RowsToSelectChanged as fn(String) -> Message))
                .on_submit(Message::SubmitSelectCount)
                .width(Length::Fixed(200.0)),
            button("Select")
                .on_press_maybe((!loading).then_some(Message::SubmitSelectCount))
                .padding(6),
        ]
        .spacing(8),
    )
    .padding(10)
    .into()
}

fn pager(state: &AppState) -> Element<'_, Message> {
    let table = &state.table;
    let paginator = table.paginator();
    let loading = table.is_loading();

    row![
        button("Previous")
            .on_press_maybe((paginator.can_go_prev() && !loading).then_some(Message::PrevPage))
            .padding(5),
        text(format!(
            "Page {} of {}",
            paginator.current_page,
            paginator.total_pages()
        ))
        .size(14),
        button("Next")
            .on_press_maybe((paginator.can_go_next() && !loading).then_some(Message::NextPage))
            .padding(5),
        text(format!(
            "{} records, {} selected",
            table.total_records(),
            table.selection().len()
        ))
        .size(14),
    ]
    .spacing(10)
    .align_y(Vertical::Center)
    .into()
}

fn status_line(state: &AppState) -> Element<'_, Message> {
    if state.table.is_loading() {
        text("Loading...").size(14).into()
    } else if let Some(error) = state.table.last_error() {
        row![
            text(format!("Error: {}", error)).size(14),
            button("Dismiss").on_press(Message::DismissError).padding(4),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
    } else {
        text("").size(14).into()
    }
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let rows: Vec<Element<Message>> = state
        .table
        .rows()
        .iter()
        .map(|artwork| artwork_row(state, artwork))
        .collect();

    let body: Element<Message> = if rows.is_empty() && !state.table.is_loading() {
        text("No artworks loaded").size(14).into()
    } else {
        scrollable(Column::with_children(rows).spacing(6))
            .height(Length::Fill)
            .into()
    };

    let mut content = column![header_row(state)].spacing(10);
    if state.table.panel_open() {
        content = content.push(selection_panel(state));
    }
    content = content
        .push(horizontal_rule(1))
        .push(body)
        .push(horizontal_rule(1))
        .push(pager(state))
        .push(status_line(state));

    container(content).padding(20).into()
}
