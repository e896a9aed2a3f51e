use yuanfen_core::constants::{INTEREST_TAGS, RECOMMENDED_STARTERS, SAFETY_WARNING};
use yuanfen_core::events::{Command, CoreEvent};
use yuanfen_core::models::subscription::{CANCEL_GUIDE, RENEWAL_WARNING};
use yuanfen_core::models::{Gender, Preference, Role, SubscriptionPlan, VerificationStep};
use yuanfen_core::nav::{NavTarget, Screen};
use yuanfen_core::Phase;

use crate::format::{
    chat_bubble_line, chat_list_line, club_card, error, heading, profile_card, support_line,
    system,
};
use crate::state::{match_profile, ReplState};
use crate::{GREEN, YELLOW};

pub(crate) enum CommandResult {
    Lines(Vec<String>),
    Quit,
}

pub(crate) async fn handle_line(line: &str, state: &mut ReplState) -> CommandResult {
    if line.is_empty() {
        return CommandResult::Lines(Vec::new());
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or("");

    match cmd {
        "quit" | "exit" => CommandResult::Quit,
        "help" => CommandResult::Lines(help_lines(state.session.phase())),
        _ => CommandResult::Lines(match state.session.phase() {
            Phase::Splash => vec![system("載入中，請稍候...")],
            Phase::Onboarding => handle_onboarding(cmd, arg, state),
            Phase::Verification => handle_verification(cmd, arg, state),
            Phase::Ready => handle_ready(cmd, arg, state).await,
        }),
    }
}

fn help_lines(phase: Phase) -> Vec<String> {
    let entries: &[(&str, &str)] = match phase {
        Phase::Splash => &[],
        Phase::Onboarding => &[
            ("name <姓名>", "您的姓名（或暱稱）"),
            ("age <年齡>", "您的年齡"),
            ("city <城市>", "居住城市"),
            ("bio <介紹>", "自我介紹"),
            ("gender 男|女", "您的性別"),
            ("prefer 男|女|都可", "想認識的對象"),
            ("interest <興趣>", "加入或移除興趣（至少 3 個）"),
            ("interests", "查看可選的興趣"),
            ("photo <網址>", "上傳大頭照（可省略）"),
            ("form", "查看目前填寫內容"),
            ("done", "完成，開始交友"),
        ],
        Phase::Verification => &[
            ("id <照片路徑>", "拍攝身分證件正面"),
            ("selfie <照片路徑>", "拍攝您的自拍照並送審"),
        ],
        Phase::Ready => &[
            ("matches [興趣]", "尋找新朋友"),
            ("pass <編號|姓名>", "暫不考慮"),
            ("greet <編號|姓名>", "打招呼並開始聊天"),
            ("ignored", "暫不考慮清單"),
            ("restore <編號|姓名>", "放回配對名單"),
            ("chats", "聊天清單"),
            ("open <編號|姓名>", "開啟聊天"),
            ("say <訊息>", "傳送訊息"),
            ("starters", "建議開場白"),
            ("voice <wav路徑>", "語音輸入（轉成文字）"),
            ("assist <wav路徑>", "語音小幫手"),
            ("support <問題>", "線上客服"),
            ("clubs", "社團"),
            ("plan", "升級會員"),
            ("me", "我的檔案"),
            ("call / hangup", "限時通話"),
            ("back", "返回"),
            ("quit", "離開"),
        ],
    };
    let mut lines = vec![heading("指令")];
    for (cmd, desc) in entries {
        lines.push(format!("  {GREEN}{cmd:<20}{RESET} {desc}", RESET = crate::RESET));
    }
    lines
}

// ─── Onboarding ─────────────────────────────────────────────────────────────

fn handle_onboarding(cmd: &str, arg: &str, state: &mut ReplState) -> Vec<String> {
    let form = &mut state.session.form;
    match cmd {
        "name" => {
            form.name = arg.to_string();
            vec![system(&format!("姓名：{arg}"))]
        }
        "age" => match arg.parse::<u8>() {
            Ok(age) => {
                form.age = Some(age);
                vec![system(&format!("年齡：{age}"))]
            }
            Err(_) => vec![error("請輸入數字年齡，例如：age 65")],
        },
        "city" => {
            form.location = arg.to_string();
            vec![system(&format!("居住城市：{arg}"))]
        }
        "bio" => {
            form.bio = arg.to_string();
            vec![system("已更新自我介紹")]
        }
        "gender" => match arg {
            "男" | "男士" => {
                form.gender = Some(Gender::Male);
                vec![system("性別：男士")]
            }
            "女" | "女士" => {
                form.gender = Some(Gender::Female);
                vec![system("性別：女士")]
            }
            _ => vec![error("請輸入：gender 男 或 gender 女")],
        },
        "prefer" => match arg {
            "男" | "男士" => {
                form.preference = Some(Preference::Male);
                vec![system("想認識：男士")]
            }
            "女" | "女士" => {
                form.preference = Some(Preference::Female);
                vec![system("想認識：女士")]
            }
            "都可" | "都想認識" => {
                form.preference = Some(Preference::Both);
                vec![system("想認識：都想認識")]
            }
            _ => vec![error("請輸入：prefer 男、prefer 女 或 prefer 都可")],
        },
        "interest" => {
            if !INTEREST_TAGS.contains(&arg) {
                let mut lines = vec![error(&format!("沒有「{arg}」這個興趣標籤"))];
                lines.push(interest_options(form.interests.as_slice()));
                return lines;
            }
            form.toggle_interest(arg);
            vec![system(&format!("目前興趣：{}", form.interests.join("、")))]
        }
        "interests" => vec![interest_options(form.interests.as_slice())],
        "photo" => {
            form.image_url = Some(arg.to_string());
            vec![system("已設定大頭照")]
        }
        "form" => {
            let f = &state.session.form;
            vec![
                heading("目前填寫內容"),
                format!("  姓名：{}", f.name),
                format!(
                    "  年齡：{}",
                    f.age.map(|a| a.to_string()).unwrap_or_default()
                ),
                format!("  城市：{}", f.location),
                format!("  介紹：{}", f.bio),
                format!("  興趣：{}", f.interests.join("、")),
            ]
        }
        "done" => match state.session.submit_onboarding() {
            Ok(()) => vec![
                system("檔案建立完成！"),
                heading("真人實名認證"),
                system("為了確保交友環境安全，我們需要確認您是本人。"),
                system("請用 id <照片路徑> 拍攝身分證件正面。"),
            ],
            Err(errors) => {
                let mut lines = vec![error("請補充以下資料：")];
                for err in errors {
                    lines.push(error(&format!("  · {err}")));
                }
                lines
            }
        },
        _ => vec![error("不認識這個指令，輸入 help 查看填寫指令")],
    }
}

fn interest_options(selected: &[String]) -> String {
    let tags = INTEREST_TAGS
        .iter()
        .map(|t| {
            if selected.iter().any(|s| s == t) {
                format!("{GREEN}[{t}]{RESET}", RESET = crate::RESET)
            } else {
                format!(" {t} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("可選興趣（請至少選 3 個）：{tags}")
}

// ─── Identity verification ──────────────────────────────────────────────────

fn handle_verification(cmd: &str, arg: &str, state: &mut ReplState) -> Vec<String> {
    match cmd {
        "id" => match state.session.verification.step() {
            VerificationStep::IdPhoto => {
                state.session.verification.attach_id_photo(arg);
                state.session.verification.advance();
                vec![system("已收到身分證件正面，請用 selfie <照片路徑> 拍攝自拍照。")]
            }
            _ => vec![error("身分證件已上傳")],
        },
        "selfie" => match state.session.verification.step() {
            VerificationStep::IdPhoto => {
                vec![error("請先用 id <照片路徑> 拍攝身分證件正面")]
            }
            VerificationStep::Selfie => {
                state.session.verification.attach_selfie(arg);
                state.session.verification.advance();
                // The review is simulated; it approves right away
                state.session.verification.complete_review();
                state.session.finish_verification();
                let mut lines = vec![
                    system("正在審核資料中...請稍候，約需幾秒鐘"),
                    system("審核通過！歡迎加入銀髮緣。"),
                ];
                lines.extend(render_screen(state));
                lines
            }
            _ => vec![error("資料已送審")],
        },
        _ => vec![error("請用 id <照片路徑> 與 selfie <照片路徑> 完成認證")],
    }
}

// ─── Main application ───────────────────────────────────────────────────────

async fn handle_ready(cmd: &str, arg: &str, state: &mut ReplState) -> Vec<String> {
    match cmd {
        "where" => vec![system(state.session.nav().current().name())],
        "nav" => match parse_nav_target(arg) {
            Some(target) => {
                state.session.dispatch(Command::Navigate(target));
                render_screen(state)
            }
            None => vec![error("可前往：home、chats、clubs、support、me、vip、ignored")],
        },
        "matches" => {
            if !arg.is_empty() {
                set_filter(state, arg);
            }
            state.session.dispatch(Command::Navigate(NavTarget::Home));
            render_screen(state)
        }
        "filter" => {
            set_filter(state, arg);
            state.session.dispatch(Command::Navigate(NavTarget::Home));
            render_screen(state)
        }
        "pass" => {
            let Some(profile) = match_profile(state.session.roster.available(), arg) else {
                return vec![error("在配對名單中找不到這位朋友")];
            };
            let (id, name) = (profile.id.clone(), profile.name.clone());
            state.session.dispatch(Command::Pass { profile_id: id });
            vec![system(&format!("已將 {name} 移到暫不考慮清單"))]
        }
        "greet" | "open" => greet(state, arg),
        "restore" => {
            let Some(profile) = match_profile(state.session.roster.ignored(), arg) else {
                return vec![error("在暫不考慮清單中找不到這位朋友")];
            };
            let (id, name) = (profile.id.clone(), profile.name.clone());
            state.session.dispatch(Command::Restore { profile_id: id });
            vec![system(&format!("已將 {name} 放回配對名單"))]
        }
        "ignored" => {
            state
                .session
                .dispatch(Command::Navigate(NavTarget::IgnoredList));
            render_screen(state)
        }
        "chats" => {
            state
                .session
                .dispatch(Command::Navigate(NavTarget::ChatList));
            render_screen(state)
        }
        "clubs" => {
            state.session.dispatch(Command::Navigate(NavTarget::Clubs));
            render_screen(state)
        }
        "plan" | "vip" => {
            state
                .session
                .dispatch(Command::Navigate(NavTarget::Subscribe));
            render_screen(state)
        }
        "me" => {
            state
                .session
                .dispatch(Command::Navigate(NavTarget::Profile));
            render_screen(state)
        }
        "say" => say(state, arg),
        "starters" => {
            let mut lines = vec![heading("建議開場白")];
            for (i, starter) in RECOMMENDED_STARTERS.iter().enumerate() {
                lines.push(format!("  {}. {starter}", i + 1));
            }
            lines.push(system("用 starter <編號> 直接送出"));
            lines
        }
        "starter" => match arg
            .parse::<usize>()
            .ok()
            .and_then(|n| RECOMMENDED_STARTERS.get(n.saturating_sub(1)).copied())
        {
            Some(text) => say(state, text),
            None => vec![error("請輸入 starter 1、2 或 3")],
        },
        "voice" => voice_input(state, arg).await,
        "assist" => voice_assist(state, arg).await,
        "support" => support(state, arg).await,
        "call" => {
            let Some(call) = state.session.start_call() else {
                return vec![error("請先選擇一位朋友聊天")];
            };
            let remaining = call.format();
            let partner = active_partner_name(state).unwrap_or_default();
            vec![
                system(&format!("正在與 {partner} 通話")),
                system(&format!("限時通話 5 分鐘，剩餘 {remaining}")),
                system("用 hangup 結束通話"),
            ]
        }
        "hangup" => {
            state.session.end_call();
            vec![system("通話結束")]
        }
        "back" => {
            let events = state.session.dispatch(Command::Back);
            if events.is_empty() {
                vec![system("這裡沒有返回")]
            } else {
                render_screen(state)
            }
        }
        _ => vec![error("不認識這個指令，輸入 help 查看可用指令")],
    }
}

fn set_filter(state: &mut ReplState, arg: &str) {
    state.interest_filter = match arg {
        "" | "全部" => None,
        tag => Some(tag.to_string()),
    };
}

fn parse_nav_target(arg: &str) -> Option<NavTarget> {
    match arg {
        "home" | "首頁" => Some(NavTarget::Home),
        "chats" | "聊天" => Some(NavTarget::ChatList),
        "clubs" | "社團" => Some(NavTarget::Clubs),
        "support" | "客服" => Some(NavTarget::Support),
        "me" | "我的" => Some(NavTarget::Profile),
        "vip" | "訂閱" => Some(NavTarget::Subscribe),
        "ignored" => Some(NavTarget::IgnoredList),
        _ => None,
    }
}

fn active_partner_name(state: &ReplState) -> Option<String> {
    let partner_id = state.session.nav().active_partner()?;
    Some(
        state
            .session
            .roster
            .get(partner_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| partner_id.to_string()),
    )
}

fn greet(state: &mut ReplState, arg: &str) -> Vec<String> {
    // Greeting works from the match list, the ignored list, and the chat list
    let profile = match_profile(state.session.roster.available(), arg)
        .or_else(|| match_profile(state.session.roster.ignored(), arg))
        .or_else(|| match_profile(state.session.roster.active_chats(), arg));
    let Some(profile) = profile else {
        return vec![error("找不到這位朋友")];
    };
    let profile_id = profile.id.clone();
    let events = state.session.dispatch(Command::Greet { profile_id });
    if events.is_empty() {
        return vec![error("找不到這位朋友")];
    }
    render_screen(state)
}

fn say(state: &mut ReplState, arg: &str) -> Vec<String> {
    if state.session.nav().active_partner().is_none() {
        return vec![error("請先選擇一位朋友聊天")];
    }
    let text = if arg.is_empty() {
        match state.pending_input.take() {
            Some(pending) => pending,
            None => return vec![error("請輸入訊息，例如：say 你好")],
        }
    } else {
        arg.to_string()
    };
    let events = state.session.dispatch(Command::SendMessage { text });
    let partner = active_partner_name(state).unwrap_or_default();
    let mut lines = Vec::new();
    for event in events {
        match event {
            CoreEvent::MessageSent { text, .. } => {
                lines.push(format!("{GREEN}我:{RESET} {text} {DIM}已讀{RESET}", RESET = crate::RESET, DIM = crate::DIM));
            }
            CoreEvent::PartnerReplied { text, .. } => {
                lines.push(format!(
                    "{CYAN}{partner}:{RESET} {text}",
                    CYAN = crate::CYAN,
                    RESET = crate::RESET
                ));
            }
            _ => {}
        }
    }
    lines
}

async fn voice_input(state: &mut ReplState, path: &str) -> Vec<String> {
    let audio = match std::fs::read(path) {
        Ok(audio) => audio,
        Err(err) => return vec![error(&format!("無法讀取語音檔：{err}"))],
    };
    let text = state.assistant.transcribe(&audio).await;
    if text.is_empty() {
        return vec![error("語音辨識失敗，請再試一次")];
    }
    // Transcription lands in the input box; sending is still the user's call
    let pending = match state.pending_input.take() {
        Some(existing) => format!("{existing}{text}"),
        None => text,
    };
    let lines = vec![
        system(&format!("語音辨識結果：{pending}")),
        system("輸入 say 送出，或用 say <訊息> 重新輸入"),
    ];
    state.pending_input = Some(pending);
    lines
}

async fn voice_assist(state: &mut ReplState, path: &str) -> Vec<String> {
    let audio = match std::fs::read(path) {
        Ok(audio) => audio,
        Err(err) => return vec![error(&format!("無法讀取語音檔：{err}"))],
    };
    let command = state.assistant.voice_command(&audio).await;
    vec![
        heading("語音小幫手"),
        system(&format!("您的需求：{}", command.intent)),
        format!("「{}」", command.reply),
        system("(語音播放中...)"),
    ]
}

async fn support(state: &mut ReplState, question: &str) -> Vec<String> {
    state
        .session
        .dispatch(Command::Navigate(NavTarget::Support));
    if question.is_empty() {
        return render_screen(state);
    }

    // History is the transcript before this question; the question itself is
    // passed separately to the collaborator
    let history = state.session.support.messages().to_vec();
    let now = now_secs();
    state.session.support.push(Role::User, question, now);

    let reply = state.assistant.support_reply(&history, question).await;
    state.session.support.push(Role::Model, reply, now_secs());

    let messages = state.session.support.messages();
    messages[messages.len().saturating_sub(2)..]
        .iter()
        .map(support_line)
        .collect()
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ─── Screen rendering ───────────────────────────────────────────────────────

pub(crate) fn render_screen(state: &ReplState) -> Vec<String> {
    match state.session.nav().current().clone() {
        Screen::Home => render_home(state),
        Screen::ChatList => render_chat_list(state),
        Screen::IgnoredList => render_ignored(state),
        Screen::Clubs => render_clubs(state),
        Screen::Subscribe => render_plan(),
        Screen::Support => render_support(state),
        Screen::Profile => render_me(state),
        Screen::Chat { partner_id } => render_chat(state, &partner_id),
    }
}

fn render_home(state: &ReplState) -> Vec<String> {
    let mut lines = vec![heading("尋找新朋友")];
    if let Some(filter) = &state.interest_filter {
        lines.push(system(&format!("目前篩選：{filter}（filter 全部 可取消）")));
    }
    let matches: Vec<_> = state
        .session
        .roster
        .available()
        .iter()
        .filter(|p| match &state.interest_filter {
            Some(tag) => p.interests.iter().any(|t| t == tag),
            None => true,
        })
        .collect();
    if matches.is_empty() {
        lines.push(system("目前沒有符合此興趣的朋友，試試看其他標籤吧！"));
        return lines;
    }
    for (i, profile) in matches.into_iter().enumerate() {
        lines.extend(profile_card(profile, i + 1));
    }
    lines.push(system("指令：greet <編號> 打招呼、pass <編號> 暫不考慮、ignored 查看清單"));
    lines
}

fn render_chat_list(state: &ReplState) -> Vec<String> {
    let mut lines = vec![heading("聊天")];
    let chats = state.session.roster.active_chats();
    if chats.is_empty() {
        lines.push(system("還沒有聊天，快去跟新朋友打招呼吧！"));
        return lines;
    }
    for (i, profile) in chats.iter().enumerate() {
        lines.push(chat_list_line(profile, i + 1));
    }
    lines.push(system("用 open <編號> 繼續聊天"));
    lines
}

fn render_ignored(state: &ReplState) -> Vec<String> {
    let mut lines = vec![heading("暫不考慮清單")];
    let ignored = state.session.roster.ignored();
    if ignored.is_empty() {
        lines.push(system("清單是空的"));
    }
    for (i, profile) in ignored.iter().enumerate() {
        lines.push(format!("  {}. {}，{}歲", i + 1, profile.name, profile.age));
    }
    lines.push(system("restore <編號> 放回名單、greet <編號> 直接打招呼、back 返回"));
    lines
}

fn render_clubs(state: &ReplState) -> Vec<String> {
    let mut lines = vec![heading("社團")];
    for (i, club) in state.session.clubs().iter().enumerate() {
        lines.extend(club_card(club, i + 1));
    }
    lines
}

fn render_plan() -> Vec<String> {
    let plan = SubscriptionPlan::gold();
    let mut lines = vec![
        heading("升級會員"),
        format!("{YELLOW}付款重要提醒：{RENEWAL_WARNING}{RESET}", RESET = crate::RESET),
        heading(&format!("{} {}", plan.name, plan.price)),
    ];
    for feature in &plan.features {
        lines.push(format!("  ✓ {feature}"));
    }
    lines.push(system("可隨時取消，下個月生效"));
    lines.push(heading("如何取消訂閱 / 解除扣款？"));
    for (i, step) in CANCEL_GUIDE.iter().enumerate() {
        lines.push(format!("  {}. {step}", i + 1));
    }
    lines
}

fn render_support(state: &ReplState) -> Vec<String> {
    let mut lines = vec![
        heading("線上客服"),
        system("我們隨時在這裡為您服務"),
    ];
    for msg in state.session.support.messages() {
        lines.push(support_line(msg));
    }
    lines.push(system("用 support <問題> 發問"));
    lines
}

fn render_me(state: &ReplState) -> Vec<String> {
    let Some(user) = state.session.current_user() else {
        return vec![error("尚未建立個人檔案")];
    };
    vec![
        heading(&user.name),
        format!("  {}歲，{}", user.age, user.location),
        format!("  興趣：{}", user.interests.join("、")),
        heading("自我介紹"),
        format!("  {}", user.bio),
    ]
}

fn render_chat(state: &ReplState, partner_id: &str) -> Vec<String> {
    let partner = state
        .session
        .roster
        .get(partner_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| partner_id.to_string());
    let mut lines = vec![
        heading(&format!("與 {partner} 聊天中")),
        format!("{YELLOW}{SAFETY_WARNING}{RESET}", RESET = crate::RESET),
    ];
    let log = state.session.chat_log();
    if log.is_empty() {
        lines.push(system("還沒有訊息，來打個招呼吧！建議開場白："));
        for (i, starter) in RECOMMENDED_STARTERS.iter().enumerate() {
            lines.push(format!("  {}. {starter}", i + 1));
        }
        lines.push(system("say <訊息> 或 starter <編號> 送出，call 發起通話，back 返回"));
        return lines;
    }
    for bubble in log.bubbles() {
        lines.push(chat_bubble_line(bubble, &partner));
    }
    lines
}
