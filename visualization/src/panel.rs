use common::compose::{LocationSection, SummaryView, TABLE_HEADERS};
use common::{InfoPanel, LocationTable, PanelSink};
use web_sys::{Document, Element};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub summary: SummaryView,
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    let parts = props
        .summary
        .entries()
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            html! {
                <>
                    if i > 0 { {" / "} }
                    {label}{"("}<b>{value.to_string()}</b>{")"}
                </>
            }
        });

    html! {
        <div>
            <p class="total">{ for parts }</p>
        </div>
    }
}

fn section_rows(section: &LocationSection) -> Html {
    html! {
        <>
            <tr>
                <td rowspan={section.row_span.to_string()}>{section.location.clone()}</td>
            </tr>
            { for section.rows.iter().map(|row| html! {
                <tr>
                    { for row.cells().into_iter().map(|cell| html! { <td>{cell}</td> }) }
                </tr>
            }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct TableProps {
    pub table: LocationTable,
}

#[function_component(LocationTableView)]
pub fn location_table(props: &TableProps) -> Html {
    html! {
        <table>
            <tr>
                { for TABLE_HEADERS.iter().map(|h| html! { <th>{*h}</th> }) }
            </tr>
            { for props.table.sections.iter().map(section_rows) }
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct InfoPanelProps {
    pub panel: InfoPanel,
}

#[function_component(InfoPanelView)]
pub fn info_panel(props: &InfoPanelProps) -> Html {
    html! {
        <>
            <Summary summary={props.panel.summary} />
            <LocationTableView table={props.panel.table.clone()} />
        </>
    }
}

/// Mounts the info panel on an element of the page, replacing its content.
pub struct DocumentPanel {
    document: Document,
}

impl DocumentPanel {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PanelSink for DocumentPanel {
    type Target = Element;

    fn find(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn write(&self, target: Element, panel: InfoPanel) {
        tracing::debug!(
            sections = panel.table.sections.len(),
            rows = panel.table.data_row_count(),
            "writing info panel"
        );
        target.set_inner_html("");
        yew::Renderer::<InfoPanelView>::with_root_and_props(target, InfoPanelProps { panel })
            .render();
    }
}
