//! The interactive loop: reads commands, runs each as its own local task,
//! fires the periodic refresh, and redraws after every operation.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use student_core::{render_html, StudentId, SyncController, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::command::{self, Command, HELP};
use crate::display::render_text;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub refresh_period: Duration,
    pub html_out: Option<PathBuf>,
}

/// Everything a spawned command needs, cheap to clone.
struct Ctx<T, W> {
    controller: Rc<SyncController<T>>,
    out: Rc<RefCell<W>>,
    options: Rc<SessionOptions>,
}

impl<T, W> Clone for Ctx<T, W> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
            out: Rc::clone(&self.out),
            options: Rc::clone(&self.options),
        }
    }
}

/// Run until `quit` or end of input, then wait for in-flight commands.
///
/// Must be called inside a `tokio::task::LocalSet`.
pub async fn run_session<T, R, W>(
    controller: Rc<SyncController<T>>,
    input: R,
    out: Rc<RefCell<W>>,
    options: SessionOptions,
) -> AppResult<()>
where
    T: Transport + 'static,
    R: AsyncBufRead + Unpin,
    W: Write + 'static,
{
    let period = options.refresh_period;
    let ctx = Ctx {
        controller,
        out,
        options: Rc::new(options),
    };

    let mut lines = input.lines();
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => writeln!(ctx.out.borrow_mut(), "{HELP}")?,
                    Ok(command) => {
                        tasks.spawn_local(execute(ctx.clone(), command));
                    }
                    Err(err) => writeln!(ctx.out.borrow_mut(), "{err}")?,
                }
            }
            _ = ticker.tick() => {
                tasks.spawn_local(periodic(ctx.clone()));
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(err) = joined {
                    warn!(error = %err, "command task failed");
                }
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "command task failed");
        }
    }
    Ok(())
}

async fn execute<T: Transport, W: Write>(ctx: Ctx<T, W>, command: Command) {
    let controller = &ctx.controller;
    let result = match command {
        Command::Refresh => controller.refresh().await,
        Command::Key(key) => {
            controller.handle_key(key).await;
            Ok(())
        }
        Command::Save(fields) => controller.submit(fields).await,
        Command::Edit(label) => {
            if let Some(id) = resolve(controller, &label) {
                controller.begin_edit(&id);
            }
            Ok(())
        }
        Command::Cancel => {
            controller.cancel_edit();
            Ok(())
        }
        Command::Delete(label) => {
            if let Some(id) = resolve(controller, &label) {
                controller.request_delete(&id);
            }
            Ok(())
        }
        Command::Confirm => controller.confirm_delete().await,
        Command::Dismiss => {
            controller.dismiss_delete_modal();
            Ok(())
        }
        Command::Connectivity(online) => {
            controller.connectivity_changed(online);
            Ok(())
        }
        Command::Show | Command::Help | Command::Quit => Ok(()),
    };
    if let Err(err) = result {
        debug!(error = %err, "command finished with error");
    }
    present(&ctx);
}

/// Map an id as typed to the roster's own id, so `12` reaches a record the
/// server keyed as the string `"12"`.
fn resolve<T: Transport>(controller: &SyncController<T>, label: &str) -> Option<StudentId> {
    let id = controller.state().find_by_label(label).map(|s| s.id.clone());
    if id.is_none() {
        debug!(label, "no student with that id");
    }
    id
}

async fn periodic<T: Transport, W: Write>(ctx: Ctx<T, W>) {
    if ctx.controller.auto_refresh_tick().await {
        present(&ctx);
    }
}

/// Draw the current view, and the HTML snapshot when one is configured.
fn present<T: Transport, W: Write>(ctx: &Ctx<T, W>) {
    let view = ctx.controller.view();
    let notifications = ctx.controller.notifications();

    if let Err(err) = write!(ctx.out.borrow_mut(), "{}", render_text(&view, &notifications)) {
        warn!(error = %err, "failed to draw view");
    }
    if let Some(path) = &ctx.options.html_out {
        let page = render_html(&view, &notifications).into_string();
        if let Err(err) = std::fs::write(path, page) {
            warn!(path = %path.display(), error = %err, "failed to write HTML snapshot");
        }
    }
}

/// Draw once outside a session, e.g. after the initial load.
pub fn draw<T: Transport, W: Write + 'static>(
    controller: &Rc<SyncController<T>>,
    out: &Rc<RefCell<W>>,
    options: &SessionOptions,
) {
    present(&Ctx {
        controller: Rc::clone(controller),
        out: Rc::clone(out),
        options: Rc::new(options.clone()),
    });
}
