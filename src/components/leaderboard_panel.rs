use yew::prelude::*;

use crate::model::LeaderEntry;
use crate::util::format_number;

#[derive(Properties, PartialEq)]
pub struct LeaderboardProps {
    pub entries: Vec<LeaderEntry>,
}

#[function_component]
pub fn LeaderboardPanel(props: &LeaderboardProps) -> Html {
    let rows = props.entries.iter().enumerate().map(|(i, entry)| {
        let medal = match i {
            0 => "🥇",
            1 => "🥈",
            2 => "🥉",
            _ => "",
        };
        html! {
            <tr key={entry.username.clone()}>
                <td>{ format!("{}{}", medal, i + 1) }</td>
                <td>{ entry.username.clone() }</td>
                <td style="text-align:right;">{ format_number(entry.gooncoins) }</td>
                <td style="text-align:right;">{ entry.total_clicks }</td>
            </tr>
        }
    });

    html! {
        <div class="panel leaderboard-panel">
            <h3 style="margin:0 0 8px;">{"Leaderboard"}</h3>
            if props.entries.is_empty() {
                <div style="opacity:0.7;">{"Nobody on the board yet."}</div>
            } else {
                <table style="width:100%; font-size:13px;">
                    <thead>
                        <tr>
                            <th>{"#"}</th>
                            <th>{"Player"}</th>
                            <th style="text-align:right;">{"Gooncoins"}</th>
                            <th style="text-align:right;">{"Clicks"}</th>
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
            }
        </div>
    }
}
