//! Demo data for the line client. The core is seeded by its caller; these
//! are the candidates and clubs a fresh install starts with.

use yuanfen_core::models::{Club, Gender, Profile};

fn candidate(
    id: &str,
    name: &str,
    age: u8,
    location: &str,
    distance_km: f32,
    bio: &str,
    interests: &[&str],
    image_url: &str,
    gender: Gender,
) -> Profile {
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        age,
        location: location.to_string(),
        distance_km,
        bio: bio.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        image_url: image_url.to_string(),
        gender: Some(gender),
        preference: None,
        last_message: None,
        last_message_time: None,
    }
}

pub(crate) fn demo_candidates() -> Vec<Profile> {
    vec![
        candidate(
            "1",
            "王大明",
            68,
            "台北市",
            2.5,
            "退休教師，喜歡週末去陽明山爬山，也喜歡研究茶葉。希望找個能一起喝茶聊天的朋友。",
            &["爬山", "茶道", "閱讀"],
            "https://picsum.photos/400/400?random=1",
            Gender::Male,
        ),
        candidate(
            "2",
            "林美惠",
            65,
            "新北市",
            5.0,
            "剛開始學攝影，想找人一起去拍風景。平常喜歡在家種花養草。",
            &["攝影", "園藝", "旅遊"],
            "https://picsum.photos/400/400?random=2",
            Gender::Female,
        ),
        candidate(
            "3",
            "陳國強",
            72,
            "桃園市",
            12.0,
            "喜歡下圍棋和聽古典音樂，每週都會去公園散步。",
            &["音樂", "棋藝", "散步"],
            "https://picsum.photos/400/400?random=3",
            Gender::Male,
        ),
    ]
}

pub(crate) fn demo_clubs() -> Vec<Club> {
    vec![
        Club {
            id: "c1".to_string(),
            name: "北區銀髮登山社".to_string(),
            description: "每週六早上集合，適合初學者的輕鬆步道行程，歡迎加入我們一起呼吸新鮮空氣！"
                .to_string(),
            member_count: 128,
            category: "戶外".to_string(),
            image_url: "https://picsum.photos/600/300?random=10".to_string(),
        },
        Club {
            id: "c2".to_string(),
            name: "快樂卡拉OK社".to_string(),
            description: "愛唱歌的朋友看過來！我們每月舉辦兩次歡唱聚會，不管是老歌還是新歌都歡迎。"
                .to_string(),
            member_count: 85,
            category: "娛樂".to_string(),
            image_url: "https://picsum.photos/600/300?random=11".to_string(),
        },
        Club {
            id: "c3".to_string(),
            name: "養生太極拳班".to_string(),
            description: "每天早上在公園一起打太極，強身健體，延年益壽。".to_string(),
            member_count: 200,
            category: "健康".to_string(),
            image_url: "https://picsum.photos/600/300?random=12".to_string(),
        },
    ]
}
