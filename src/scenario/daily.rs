// Everyday ham radio contact: CQ call, name / QTH exchange, weather, sign-off.
use super::{Scenario, Turn};

pub static DAILY: Scenario = Scenario {
    id: "daily",
    title: "Everyday QSO",
    turns: &[
        Turn {
            send: "CQCQCQ DE JH1MRS JH1MRS AR K",
            translation: "CQ, this is JH1MRS calling. Anyone on frequency?",
            receive: "JH1MRS DE JG1LSJ GA OM K",
            receive_translation: "JH1MRS, this is JG1LSJ. Good afternoon!",
        },
        Turn {
            send: "JG1LSJ DE JH1MRS TNX CALL NAME MAARUSU QTH CHOFU AGE 21 K",
            translation: "Thanks for the call. My name is Maarusu, I live in Chofu, age 21.",
            receive: "JH1MRS DE JG1LSJ R R NAME RISAJU QTH YOKOHAMA AGE 20 ES DESIGN MAJOR K",
            receive_translation: "Roger. I'm Risaju from Yokohama, 20, majoring in design.",
        },
        Turn {
            send: "JG1LSJ DE JH1MRS FB I STUDY TELECOM WX SUNNY 25C K",
            translation: "Fine business! I study telecom. Weather here is sunny, 25C.",
            receive: "JH1MRS DE JG1LSJ WX CLOUDY TU QSO MAARUSU CUAGN 73 SK",
            receive_translation: "Cloudy here. Thanks for the QSO, Maarusu. See you again, 73.",
        },
    ],
};
