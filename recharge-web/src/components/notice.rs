use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    const fn class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
            Self::Info => "notice notice--info",
        }
    }
}

/// A transient message shown above the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: AttrValue,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<AttrValue>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<AttrValue>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<AttrValue>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBar)]
pub fn notice_bar(p: &Props) -> Html {
    let Some(notice) = p.notice.clone() else {
        return Html::default();
    };
    let role = if notice.kind == NoticeKind::Error {
        "alert"
    } else {
        "status"
    };
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class={notice.kind.class()} role={role} data-testid="notice">
            <span>{ notice.text }</span>
            <button type="button" class="notice__close" aria-label="Dismiss" onclick={dismiss}>{"×"}</button>
        </div>
    }
}
