use std::fs::File;
use std::time::Instant;

use gridline::prelude::*;
use gridline::value::display_string;
use serde_json::{Value, json};
use simplelog::{Config, LevelFilter, WriteLogger};

fn people() -> Vec<Value> {
    let names = ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances"];
    let teams = ["compilers", "kernels", "databases"];
    (0..40)
        .map(|i| {
            json!({
                "id": i + 1,
                "name": format!("{} {}", names[i % names.len()], i / names.len() + 1),
                "team": teams[i % teams.len()],
                "age": 20 + (i * 7) % 41,
                "joined": format!("20{:02}-0{}-1{}", 10 + i % 14, 1 + i % 9, i % 10),
            })
        })
        .collect()
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::field_column("id", "ID").width(70.0).pinned(Pin::Left),
        Column::field_column("name", "Name")
            .header_group("person")
            .editable(true)
            .flex(2.0),
        Column::field_column("age", "Age")
            .header_group("person")
            .filter_type(FilterType::Number),
        Column::field_column("team", "Team").header_group("work"),
        Column::field_column("joined", "Joined")
            .header_group("work")
            .filter_type(FilterType::Date),
    ]
}

fn print_view(grid: &Grid<Value>) {
    let view = grid.view();
    let columns = view.columns();

    let bands: Vec<String> = view
        .header_sections()
        .iter()
        .map(|section| match section {
            HeaderSection::Group { label, column_span, .. } => format!("[{label} x{column_span}]"),
            HeaderSection::Ungrouped { column_span, .. } => format!("[- x{column_span}]"),
            HeaderSection::DragGap { column_span, .. } => format!("[gap x{column_span}]"),
        })
        .collect();
    println!("groups: {}", bands.join(" "));

    let header: Vec<String> = columns
        .iter()
        .map(|column| {
            format!(
                "{:<12}",
                format!("{}{}", column.header_label(), view.sort_indicator(&column.id))
            )
        })
        .collect();
    println!("{}", header.join(""));

    for row in view.visible_rows().iter().take(8) {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let text = if column.is_selection_column() {
                    let mark = if grid.is_row_selected(row.source_index) { "[x]" } else { "[ ]" };
                    mark.to_string()
                } else {
                    gridline::engine::display_value(column, row.source)
                };
                format!("{text:<12}")
            })
            .collect();
        println!("{}", cells.join(""));
    }
    let page = grid.page_state();
    println!(
        "page {}/{} ({} rows matched)\n",
        page.page_index + 1,
        view.total_pages(),
        view.sorted_rows().len()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("gridline-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let config = GridConfig::from_json(r#"{"defaultPageSize": 10, "rowHeight": 32}"#)?.header_groups(vec![
        HeaderGroupDef::new("person", "Person"),
        HeaderGroupDef::new("work", "Work"),
    ]);
    let mut grid = Grid::new(people(), columns(), config)?;
    grid.set_viewport_size(900.0, 320.0);
    print_view(&grid);

    let now = Instant::now();
    grid.toggle_sort("team", false, now);
    grid.toggle_sort("age", true, now);
    grid.set_number_filter("age", FilterBound::Lower, Some(30.0));
    print_view(&grid);

    grid.toggle_row_selection(3, false);
    grid.toggle_row_selection(9, true);
    grid.on_cell_key(0, 1, Key::Char('c'), Modifiers::ctrl());

    grid.begin_column_drag("joined");
    let name_width = grid.view().width_of("name");
    grid.column_drag_over("name", 10.0, name_width, now);
    print_view(&grid);
    grid.drop_on_current_target();

    grid.start_edit(3, "name");
    grid.commit_edit("Ada Lovelace");
    print_view(&grid);

    for event in grid.drain_events() {
        match event {
            GridEvent::SelectionChanged { rows } => {
                let ids: Vec<String> = rows.iter().map(|row| display_string(row.get("id"))).collect();
                println!("selection: {}", ids.join(", "));
            }
            GridEvent::SortChanged(sort) => println!("sort: {sort:?}"),
            GridEvent::PageChanged(page) => println!("page: {page:?}"),
            GridEvent::CellEditCommitted(edit) => {
                println!("edit: row {} {} = {:?}", edit.row_index, edit.column_id, edit.next_value)
            }
            GridEvent::ColumnGroupChanged {
                column_id,
                header_group_id,
            } => println!("group: {column_id} -> {header_group_id:?}"),
            GridEvent::ClipboardCopy(text) => println!("copy: {text:?}"),
        }
    }

    Ok(())
}
