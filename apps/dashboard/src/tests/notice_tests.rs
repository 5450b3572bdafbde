use super::*;
use shared::domain::OrderId;

#[test]
fn backend_errors_keep_server_text_behind_context_prefix() {
    let err = ClientError::Backend {
        status: 400,
        message: "invalid state transition".into(),
    };
    let notice = Notice::new(NoticeContext::UpdateStatus, &err);

    assert_eq!(notice.kind(), ErrorKind::Backend);
    assert_eq!(
        notice.to_string(),
        "Error updating status: invalid state transition"
    );
}

#[test]
fn validation_errors_are_shown_without_prefix() {
    let notice = notice(NoticeContext::CancelOrder)(ClientError::Validation(
        "a cancellation reason is required".into(),
    ));
    assert_eq!(notice.to_string(), "a cancellation reason is required");

    let unknown = Notice::new(
        NoticeContext::UpdateStatus,
        &ClientError::UnknownOrder(OrderId(4)),
    );
    assert_eq!(unknown.kind(), ErrorKind::Validation);
    assert_eq!(
        unknown.to_string(),
        "order 4 is not part of the current snapshot"
    );
}

#[test]
fn transport_errors_name_the_failed_action() {
    let notice = Notice::new(
        NoticeContext::LoadOrders,
        &ClientError::Transport("connection refused".into()),
    );
    assert_eq!(notice.kind(), ErrorKind::Transport);
    assert_eq!(
        notice.to_string(),
        "Error loading orders: connection refused"
    );
}
