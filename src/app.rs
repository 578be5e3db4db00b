use gloo_timers::future::TimeoutFuture;
use leptos::html::Div;
use leptos::*;
use web_sys::{MouseEvent, TouchEvent};

use crate::config::GestureConfig;
use crate::domain::gesture::{LongPressOptions, PressInfo, PullEvent};
use crate::domain::logging::LogComponent;
use crate::presentation::{PullToRefreshIndicator, use_long_press, use_pull_to_refresh};
use crate::{log_error, log_info};

const COMPONENT: LogComponent = LogComponent::Presentation("App");

/// Simulated quote round-trip for the demo refresh.
const DEMO_REFRESH_MS: u32 = 800;

const WATCHLIST: [(&str, &str, f64); 12] = [
    ("510300", "沪深300ETF", 3.912),
    ("510500", "中证500ETF", 5.734),
    ("159915", "创业板ETF", 1.986),
    ("588000", "科创50ETF", 0.947),
    ("513100", "纳指ETF", 1.582),
    ("510880", "红利ETF", 3.105),
    ("518880", "黄金ETF", 5.471),
    ("513180", "恒生科技ETF", 0.612),
    ("512880", "证券ETF", 1.043),
    ("512170", "医疗ETF", 0.398),
    ("515790", "光伏ETF", 0.871),
    ("159920", "恒生ETF", 1.227),
];

/// One watchlist line as shown in the demo.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistRow {
    pub code: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub change_pct: f64,
    pub revision: u32,
}

/// Deterministic quotes for a given refresh round.
pub fn watchlist_snapshot(revision: u32) -> Vec<WatchlistRow> {
    WATCHLIST
        .iter()
        .enumerate()
        .map(|(index, &(code, name, base))| {
            let seed = (revision as u64 + 1).wrapping_mul(6364136223846793005).wrapping_add(index as u64 * 1442695040888963407);
            let change_pct = ((seed >> 33) % 600) as f64 / 100.0 - 3.0;
            WatchlistRow {
                code,
                name,
                price: base * (1.0 + change_pct / 100.0),
                change_pct,
                revision,
            }
        })
        .collect()
}

pub fn mount(config: GestureConfig) {
    mount_to_body(move || view! { <App config=config/> });
}

#[component]
pub fn App(#[prop(optional)] config: GestureConfig) -> impl IntoView {
    view! {
        <style>
            {r#"
            .etf-app {
                font-family: -apple-system, BlinkMacSystemFont, 'PingFang SC', sans-serif;
                display: flex;
                flex-direction: column;
                height: 100vh;
                background: #f5f6f8;
                color: #1f2329;
            }
            .etf-header {
                padding: 14px 16px;
                font-size: 18px;
                font-weight: 600;
                background: #ffffff;
                border-bottom: 1px solid #e5e6eb;
            }
            .etf-scroll {
                flex: 1;
                overflow-y: auto;
                overscroll-behavior-y: contain;
            }
            .etf-list {
                list-style: none;
                margin: 0;
                padding: 0;
            }
            .etf-row {
                display: flex;
                justify-content: space-between;
                padding: 14px 16px;
                background: #ffffff;
                border-bottom: 1px solid #f0f1f3;
                user-select: none;
                -webkit-touch-callout: none;
            }
            .etf-row.selected { background: #e8f3ff; }
            .etf-code { font-size: 12px; color: #86909c; }
            .etf-up { color: #f53f3f; }
            .etf-down { color: #00b42a; }
            .etf-status {
                padding: 8px 16px;
                font-size: 12px;
                color: #4e5969;
                background: #ffffff;
                border-top: 1px solid #e5e6eb;
            }
            .ptr-indicator { overflow: hidden; }
            .ptr-indicator.ptr-animated { transition: all 300ms; }
            .ptr-indicator-body {
                display: flex;
                align-items: center;
                justify-content: center;
                gap: 8px;
                height: 100%;
            }
            .ptr-icon { display: inline-block; width: 16px; height: 16px; }
            .ptr-icon-arrow::before { content: '↓'; }
            .ptr-icon-spinner::before { content: '⟳'; }
            .ptr-icon-spinner { animation: ptr-spin 1s linear infinite; }
            .ptr-icon-check::before { content: '✓'; }
            .ptr-label { font-size: 12px; }
            .ptr-primary { color: #165dff; }
            .ptr-muted { color: #86909c; }
            @keyframes ptr-spin { to { transform: rotate(360deg); } }
            "#}
        </style>
        <div class="etf-app">
            <div class="etf-header">"ETF 自选"</div>
            <Watchlist config=config/>
        </div>
    }
}

#[component]
fn Watchlist(config: GestureConfig) -> impl IntoView {
    let scroll_ref = create_node_ref::<Div>();
    let (revision, set_revision) = create_signal(0u32);
    let rows = create_memo(move |_| watchlist_snapshot(revision.get()));
    let (status, set_status) = create_signal(String::from("下拉刷新行情，长按选择"));
    let selected = create_rw_signal(None::<&'static str>);

    let refresh = move || async move {
        TimeoutFuture::new(DEMO_REFRESH_MS).await;
        set_revision.update(|round| *round += 1);
        Ok::<(), String>(())
    };

    let signals = match use_pull_to_refresh(scroll_ref, refresh, config.pull_to_refresh) {
        Ok(signals) => signals,
        Err(e) => {
            log_error!(COMPONENT, "pull-to-refresh unavailable: {}", e);
            return view! { <div class="etf-status">{format!("配置错误: {e}")}</div> }.into_view();
        }
    };

    signals.controller().subscribe(move |event| {
        if let PullEvent::RefreshSettled { result } = event {
            match result {
                Ok(()) => set_status.set(String::from("行情已更新")),
                Err(e) => set_status.set(format!("刷新失败: {e}")),
            }
        }
    });

    let long_press = config.long_press;
    view! {
        <div class="etf-scroll" node_ref=scroll_ref>
            <PullToRefreshIndicator
                pull_distance=signals.pull_distance
                state=signals.state
                threshold=signals.threshold
            />
            <ul class="etf-list">
                <For
                    each=move || rows.get()
                    key=|row| (row.code, row.revision)
                    children=move |row| {
                        view! {
                            <WatchlistItem
                                row=row
                                options=long_press
                                selected=selected
                                set_status=set_status
                            />
                        }
                    }
                />
            </ul>
        </div>
        <div class="etf-status">{status}</div>
    }
    .into_view()
}

#[component]
fn WatchlistItem(
    row: WatchlistRow,
    options: LongPressOptions,
    selected: RwSignal<Option<&'static str>>,
    set_status: WriteSignal<String>,
) -> impl IntoView {
    let code = row.code;
    let name = row.name;

    let on_long_press = move |_: PressInfo| {
        selected.update(|current| {
            *current = if *current == Some(code) { None } else { Some(code) };
        });
        set_status.set(format!("已选择 {name}"));
    };
    let on_click = move |_: PressInfo| {
        log_info!(COMPONENT, "open {}", code);
        set_status.set(format!("打开 {name} ({code})"));
    };

    let handlers = match use_long_press(on_long_press, on_click, options) {
        Ok(handlers) => handlers,
        Err(e) => {
            log_error!(COMPONENT, "long press unavailable: {}", e);
            return view! { <li class="etf-row">{name}</li> }.into_view();
        }
    };

    let touch_start = {
        let h = handlers.clone();
        move |ev: TouchEvent| h.on_touch_start(&ev)
    };
    let touch_move = {
        let h = handlers.clone();
        move |ev: TouchEvent| h.on_touch_move(&ev)
    };
    let touch_end = {
        let h = handlers.clone();
        move |ev: TouchEvent| h.on_touch_end(&ev)
    };
    let touch_cancel = {
        let h = handlers.clone();
        move |ev: TouchEvent| h.on_touch_cancel(&ev)
    };
    let mouse_down = {
        let h = handlers.clone();
        move |ev: MouseEvent| h.on_mouse_down(&ev)
    };
    let mouse_move = {
        let h = handlers.clone();
        move |ev: MouseEvent| h.on_mouse_move(&ev)
    };
    let mouse_up = {
        let h = handlers.clone();
        move |ev: MouseEvent| h.on_mouse_up(&ev)
    };
    let mouse_leave = move |ev: MouseEvent| handlers.on_mouse_leave(&ev);

    let trend = if row.change_pct >= 0.0 { "etf-up" } else { "etf-down" };
    view! {
        <li
            class="etf-row"
            class:selected=move || selected.get() == Some(code)
            on:touchstart=touch_start
            on:touchmove=touch_move
            on:touchend=touch_end
            on:touchcancel=touch_cancel
            on:mousedown=mouse_down
            on:mousemove=mouse_move
            on:mouseup=mouse_up
            on:mouseleave=mouse_leave
        >
            <div>
                <div>{name}</div>
                <div class="etf-code">{code}</div>
            </div>
            <div class=trend>
                <div>{format!("{:.3}", row.price)}</div>
                <div>{format!("{:+.2}%", row.change_pct)}</div>
            </div>
        </li>
    }
    .into_view()
}
