use crate::action::{Action, ActionResponse};
use crate::auth::{
    LoginChallenge, LoginPhase, check_login_result, derive_private_key, hmac_md5_hex, login_password, sign,
};
use crate::error::HnapError;
use crate::session::{Session, SessionField};

const PUBLIC_KEY: &str = "jXesCa9ek/lI0/R4TNdr";
const CHALLENGE: &str = "q9l0h9ieIXKwJlEtTXps";
const PASSWORD: &str = "motorola";
const TIMESTAMP: i64 = 1703361406202;
const DERIVED_KEY: &str = "376888B58EBBAA4207D9D4E898C2E504";

fn response(pairs: &[(&str, &str)]) -> ActionResponse {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_hmac_md5_known_vector() {
    let key = format!("{}{}", PUBLIC_KEY, PASSWORD);
    assert_eq!(hmac_md5_hex(&key, CHALLENGE).unwrap(), DERIVED_KEY);
}

#[test]
fn test_derive_private_key() {
    assert_eq!(derive_private_key(PUBLIC_KEY, PASSWORD, CHALLENGE).unwrap(), DERIVED_KEY);
}

#[test]
fn test_login_password() {
    assert_eq!(login_password(DERIVED_KEY, CHALLENGE).unwrap(), "AF4422DC7F165272D1C9F2463733BD3A");
}

#[test]
fn test_sign_with_default_key() {
    assert_eq!(
        sign("withoutloginkey", Action::Login, TIMESTAMP).unwrap(),
        "B390D71563C4C02619AF9D61F9D942AF 1703361406202"
    );
}

#[test]
fn test_sign_with_derived_key() {
    assert_eq!(
        sign(DERIVED_KEY, Action::Login, TIMESTAMP).unwrap(),
        "FD695E907F6790F96AD8EF0FB19BCF32 1703361406202"
    );
}

#[test]
fn test_sign_is_deterministic() {
    let first = sign(DERIVED_KEY, Action::GetMotoStatusDownstreamChannelInfo, TIMESTAMP).unwrap();
    let second = sign(DERIVED_KEY, Action::GetMotoStatusDownstreamChannelInfo, TIMESTAMP).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "C98D3110ED993F4EFBDFCB6623549FAA 1703361406202");
}

#[test]
fn test_action_names_round_trip() {
    for action in Action::ALL {
        assert_eq!(action.name().parse::<Action>().unwrap(), action);
        assert_eq!(action.to_string(), action.name());
    }
    assert_eq!(Action::Login.soap_action(), "http://purenetworks.com/HNAP1/Login");
    assert_eq!(
        Action::GetMotoStatusUpstreamChannelInfo.response_key(),
        "GetMotoStatusUpstreamChannelInfoResponse"
    );
}

#[test]
fn test_unknown_action_rejected() {
    for name in ["Reboot", "login", "", "GetMotoStatusDownstreamChannelInfoX"] {
        match name.parse::<Action>() {
            Err(HnapError::InvalidAction(got)) => assert_eq!(got, name),
            other => panic!("{:?}: expected InvalidAction, got {:?}", name, other),
        }
    }
}

#[test]
fn test_session_defaults() {
    let session = Session::new();
    assert_eq!(session.private_key(), "withoutloginkey");
    assert_eq!(session.uid(), "");
    assert_eq!(session.cookie_header(), None);
}

#[test]
fn test_session_set_and_get() {
    let mut session = Session::new();
    session.set_private_key("test");
    assert_eq!(session.get(SessionField::PrivateKey), "test");
    assert_eq!(session.get(SessionField::Uid), "");
    assert_eq!(session.cookie_header().as_deref(), Some("PrivateKey=test"));

    session.set(SessionField::Uid, "1234");
    assert_eq!(session.cookie_header().as_deref(), Some("PrivateKey=test; uid=1234"));

    session.clear();
    assert_eq!(session, Session::new());
}

#[test]
fn test_session_absorb_set_cookie() {
    let mut session = Session::new();

    assert!(session.absorb_set_cookie("uid=abcd; path=/; Secure"));
    assert_eq!(session.uid(), "abcd");

    assert!(session.absorb_set_cookie("PrivateKey=ABC"));
    assert_eq!(session.private_key(), "ABC");

    // Other paths and other cookies are ignored
    assert!(!session.absorb_set_cookie("uid=other; Path=/admin"));
    assert!(!session.absorb_set_cookie("theme=dark; Path=/"));
    assert!(!session.absorb_set_cookie("garbage"));
    assert_eq!(session.uid(), "abcd");
}

#[test]
fn test_session_expired_cookie_deletes_field() {
    let mut session = Session::new();
    session.set_private_key(DERIVED_KEY);
    session.set_uid("1234");

    assert!(session.absorb_set_cookie("PrivateKey=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/"));
    assert_eq!(session.private_key(), "withoutloginkey");

    assert!(session.absorb_set_cookie("uid=; Max-Age=0; Path=/"));
    assert_eq!(session.uid(), "");
    assert_eq!(session.cookie_header(), None);
}

#[test]
fn test_session_future_expiry_is_kept() {
    let mut session = Session::new();
    assert!(session.absorb_set_cookie("uid=abcd; Max-Age=3600; Expires=Fri, 01 Jan 2100 00:00:00 GMT; Path=/"));
    assert_eq!(session.uid(), "abcd");
}

#[test]
fn test_session_quoted_cookie_value() {
    let mut session = Session::new();
    assert!(session.absorb_set_cookie("uid=\"q123\"; Path=/"));
    assert_eq!(session.uid(), "q123");
    assert_eq!(session.cookie_header().as_deref(), Some("uid=q123"));
}

#[test]
fn test_login_challenge_from_response() {
    let resp = response(&[
        ("LoginResult", "OK"),
        ("PublicKey", PUBLIC_KEY),
        ("Challenge", CHALLENGE),
        ("Cookie", "12345"),
    ]);
    let challenge = LoginChallenge::from_response(&resp);
    assert_eq!(challenge.public_key, PUBLIC_KEY);
    assert_eq!(challenge.challenge, CHALLENGE);
    assert_eq!(challenge.cookie, "12345");

    assert_eq!(LoginChallenge::from_response(&response(&[])), LoginChallenge::default());
}

#[test]
fn test_check_login_result() {
    assert!(check_login_result(&response(&[("LoginResult", "OK")]), LoginPhase::Request).is_ok());
    assert!(check_login_result(&response(&[("LoginResult", "OK_CHANGED")]), LoginPhase::Login).is_ok());

    assert!(matches!(
        check_login_result(&response(&[("LoginResult", "FAILED")]), LoginPhase::Login),
        Err(HnapError::LoginFailed(LoginPhase::Login))
    ));
    assert!(matches!(
        check_login_result(&response(&[]), LoginPhase::Request),
        Err(HnapError::LoginFailed(LoginPhase::Request))
    ));
}
